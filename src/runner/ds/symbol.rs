use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A symbol value. Two symbols are the same only if they came from the same
/// `SymbolData::new` call (clones share identity), regardless of description.
#[derive(Debug)]
pub struct SymbolData {
    id: Uuid,
    description: String,
}

impl SymbolData {
    pub fn new(description: &str) -> Self {
        SymbolData {
            id: Uuid::new_v4(),
            description: description.to_string(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
impl Clone for SymbolData {
    fn clone(&self) -> Self {
        SymbolData {
            id: self.id,
            description: self.description.to_string(),
        }
    }
}
impl PartialEq for SymbolData {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for SymbolData {}
impl Hash for SymbolData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
impl Display for SymbolData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}
