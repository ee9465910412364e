//! Generation credits and rewrite tones.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Credits a new session starts with.
pub const INITIAL_CREDITS: u32 = 3;

/// Credits granted by a purchase.
pub const PURCHASE_GRANT: u32 = 10;

/// Error when spending a credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CreditsError {
    #[error("no credits left")]
    Exhausted,
}

/// Remaining generation allowance for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credits(u32);

impl Default for Credits {
    fn default() -> Self {
        Self(INITIAL_CREDITS)
    }
}

impl Credits {
    #[must_use]
    pub const fn new(remaining: u32) -> Self {
        Self(remaining)
    }

    #[must_use]
    pub const fn remaining(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        self.0 == 0
    }

    /// Spend one credit.
    ///
    /// # Errors
    ///
    /// Returns `CreditsError::Exhausted` when nothing is left; the balance
    /// is unchanged.
    pub const fn consume_one(&mut self) -> Result<(), CreditsError> {
        if self.0 == 0 {
            return Err(CreditsError::Exhausted);
        }
        self.0 -= 1;
        Ok(())
    }

    /// Set the balance to the purchase grant, whatever it was before.
    pub const fn refill(&mut self) {
        self.0 = PURCHASE_GRANT;
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Voice the rewritten text should take.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Persuasive,
}

impl Tone {
    pub const ALL: [Self; 3] = [Self::Professional, Self::Friendly, Self::Persuasive];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Friendly => "Friendly",
            Self::Persuasive => "Persuasive",
        }
    }

    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Friendly => "friendly",
            Self::Persuasive => "persuasive",
        }
    }

    /// System instruction sent with every rewrite request in this tone.
    #[must_use]
    pub fn system_instruction(self) -> String {
        let voice = match self {
            Self::Professional => "a clear, concise and professional tone suitable for business",
            Self::Friendly => "a warm, friendly and approachable tone",
            Self::Persuasive => "a confident, persuasive tone that moves the reader to act",
        };
        format!(
            "You are an expert copy editor. Rewrite the user's text in {voice}. \
             Keep the original meaning and language. Reply with the rewritten text only."
        )
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
