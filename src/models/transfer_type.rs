use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// Who drives the transfer
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlowType {
    Push,
    Pull,
}

/// A transfer type such as `HttpData-PULL` or `FileSystem-PUSH`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransferType {
    pub name: String,
    pub flow: FlowType,
}

impl TransferType {
    pub fn is_push(&self) -> bool {
        self.flow == FlowType::Push
    }

    pub fn is_pull(&self) -> bool {
        self.flow == FlowType::Pull
    }
}

impl FromStr for TransferType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, suffix) = s.rsplit_once('-').ok_or_else(|| {
            DomainError::Validation(format!(
                "transfer type '{}' must look like <Name>-PUSH or <Name>-PULL",
                s
            ))
        })?;

        if name.is_empty() {
            return Err(DomainError::Validation(format!(
                "transfer type '{}' has no name",
                s
            )));
        }

        let flow = if suffix.eq_ignore_ascii_case("PUSH") {
            FlowType::Push
        } else if suffix.eq_ignore_ascii_case("PULL") {
            FlowType::Pull
        } else {
            return Err(DomainError::Validation(format!(
                "unknown flow type '{}' in transfer type '{}'",
                suffix, s
            )));
        };

        Ok(Self {
            name: name.to_string(),
            flow,
        })
    }
}

impl TryFrom<String> for TransferType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TransferType> for String {
    fn from(value: TransferType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.flow {
            FlowType::Push => "PUSH",
            FlowType::Pull => "PULL",
        };
        write!(f, "{}-{}", self.name, suffix)
    }
}
