//! Programs shipped with the compiler

pub mod approval;
pub mod gold_transfer;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use teal_ir::{BuildError, Expression, Mode, DEFAULT_VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgramKind {
    /// Stateful approval program storing and checking `mynumber`
    #[default]
    Approval,
    /// Logic signature for GOLD asset opt-ins and transfers
    GoldTransfer,
}

impl ProgramKind {
    pub fn build(self) -> Result<Expression, BuildError> {
        match self {
            ProgramKind::Approval => approval::build_program(),
            ProgramKind::GoldTransfer => gold_transfer::build_program(),
        }
    }

    pub fn mode(self) -> Mode {
        match self {
            ProgramKind::Approval => Mode::Application,
            ProgramKind::GoldTransfer => Mode::Signature,
        }
    }

    pub fn default_version(self) -> u8 {
        match self {
            ProgramKind::Approval => approval::APPROVAL_VERSION,
            ProgramKind::GoldTransfer => DEFAULT_VERSION,
        }
    }
}

impl Display for ProgramKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgramKind::Approval => write!(f, "approval"),
            ProgramKind::GoldTransfer => write!(f, "gold-transfer"),
        }
    }
}
