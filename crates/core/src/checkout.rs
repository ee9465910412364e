//! Checkout validation and order placement.
//!
//! Orders are not stored anywhere: placing an order produces a confirmation
//! for display and empties the cart.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::Product;
use crate::types::Price;

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
    BankTransfer,
    MobileWallet,
}

impl PaymentMethod {
    /// All methods in display order.
    pub const ALL: [Self; 3] = [Self::CashOnDelivery, Self::BankTransfer, Self::MobileWallet];

    /// Customer-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "Efectivo contra entrega",
            Self::BankTransfer => "Transferencia bancaria",
            Self::MobileWallet => "Nequi/Daviplata",
        }
    }

    /// Form value.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cash_on_delivery",
            Self::BankTransfer => "bank_transfer",
            Self::MobileWallet => "mobile_wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Delivery details as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub payment: PaymentMethod,
}

/// Checkout fields that must not be blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Phone,
    Address,
}

impl RequiredField {
    /// Form label of the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Nombre completo",
            Self::Phone => "Teléfono",
            Self::Address => "Dirección de entrega",
        }
    }
}

/// Reasons a checkout submission is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    /// One or more required fields are empty or whitespace.
    #[error("Por favor completa los campos obligatorios (*)")]
    MissingFields(Vec<RequiredField>),
    /// Nothing to order.
    #[error("Tu carrito está vacío.")]
    EmptyCart,
}

impl CheckoutForm {
    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingFields` listing every blank required field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let missing: Vec<RequiredField> = [
            (RequiredField::Name, &self.name),
            (RequiredField::Phone, &self.phone),
            (RequiredField::Address, &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::MissingFields(missing))
        }
    }
}

/// What the customer sees after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub payment: PaymentMethod,
    pub total: Price,
    pub item_count: u32,
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Validate `form`, total the cart and empty it.
///
/// On error the cart is left exactly as it was.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` when there is nothing to order and
/// `CheckoutError::MissingFields` when a required field is blank.
pub fn place_order(
    cart: &mut Cart,
    products: &[Product],
    form: &CheckoutForm,
) -> Result<OrderConfirmation, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    form.validate()?;

    let confirmation = OrderConfirmation {
        name: form.name.trim().to_string(),
        phone: form.phone.trim().to_string(),
        address: form.address.trim().to_string(),
        email: optional(&form.email),
        notes: optional(&form.notes),
        payment: form.payment,
        total: cart.total(products),
        item_count: cart.count(),
    };
    cart.clear();

    Ok(confirmation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;
    use crate::types::ProductId;

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            name: "María G.".to_string(),
            phone: "300 123 4567".to_string(),
            email: String::new(),
            address: "Calle Principal #123".to_string(),
            notes: "  ".to_string(),
            payment: PaymentMethod::MobileWallet,
        }
    }

    fn cart_with_items() -> Cart {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1));
        cart.add(ProductId::new(1));
        cart.add(ProductId::new(11));
        cart
    }

    #[test]
    fn test_validate_reports_every_blank_field() {
        let form = CheckoutForm {
            name: "   ".to_string(),
            phone: String::new(),
            address: "Calle 1".to_string(),
            ..CheckoutForm::default()
        };
        assert_eq!(
            form.validate(),
            Err(CheckoutError::MissingFields(vec![
                RequiredField::Name,
                RequiredField::Phone
            ]))
        );
    }

    #[test]
    fn test_blank_required_field_leaves_cart_untouched() {
        for blank in [RequiredField::Name, RequiredField::Phone, RequiredField::Address] {
            let mut form = filled_form();
            match blank {
                RequiredField::Name => form.name = " \t".to_string(),
                RequiredField::Phone => form.phone = String::new(),
                RequiredField::Address => form.address = "\n".to_string(),
            }

            let mut cart = cart_with_items();
            let before = cart.clone();
            let err = place_order(&mut cart, catalog(), &form).expect_err("must reject");

            assert_eq!(err, CheckoutError::MissingFields(vec![blank]));
            assert_eq!(cart, before);
        }
    }

    #[test]
    fn test_place_order_clears_cart_and_reports_total() {
        let mut cart = cart_with_items();
        let expected_total = cart.total(catalog());

        let confirmation = place_order(&mut cart, catalog(), &filled_form()).expect("order");

        assert!(cart.is_empty());
        assert_eq!(confirmation.total, expected_total);
        assert_eq!(confirmation.total, Price::new(7500));
        assert_eq!(confirmation.item_count, 3);
        assert_eq!(confirmation.name, "María G.");
        assert_eq!(confirmation.payment, PaymentMethod::MobileWallet);
        assert_eq!(confirmation.email, None);
        assert_eq!(confirmation.notes, None);
    }

    #[test]
    fn test_place_order_on_empty_cart() {
        let mut cart = Cart::new();
        assert_eq!(
            place_order(&mut cart, catalog(), &filled_form()),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::CashOnDelivery.to_string(), "Efectivo contra entrega");
        assert_eq!(PaymentMethod::MobileWallet.as_param(), "mobile_wallet");
    }
}
