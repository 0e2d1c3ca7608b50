#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EntityValue {
    Internal {
        replacement_text: String,
    },
    External {
        public_id: Option<String>,
        system_id: String,
        /// Set for unparsed entities.
        notation: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EntityDecl {
    pub name: String,
    pub value: EntityValue,
    /// Declared in the external subset.
    pub external: bool,
}

impl EntityDecl {
    pub fn internal(name: &str, replacement_text: &str) -> Self {
        Self {
            name: name.to_string(),
            value: EntityValue::Internal {
                replacement_text: replacement_text.to_string(),
            },
            external: false,
        }
    }

    pub fn external(name: &str, public_id: Option<&str>, system_id: &str) -> Self {
        Self {
            name: name.to_string(),
            value: EntityValue::External {
                public_id: public_id.map(str::to_string),
                system_id: system_id.to_string(),
                notation: None,
            },
            external: false,
        }
    }

    pub fn unparsed(name: &str, public_id: Option<&str>, system_id: &str, notation: &str) -> Self {
        Self {
            name: name.to_string(),
            value: EntityValue::External {
                public_id: public_id.map(str::to_string),
                system_id: system_id.to_string(),
                notation: Some(notation.to_string()),
            },
            external: false,
        }
    }

    pub fn declared_externally(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    pub fn notation(&self) -> Option<&str> {
        match &self.value {
            EntityValue::External { notation, .. } => notation.as_deref(),
            EntityValue::Internal { .. } => None,
        }
    }

    pub fn is_unparsed(&self) -> bool {
        self.notation().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NotationDecl {
    pub name: String,
    pub public_id: Option<String>,
    pub system_id: Option<String>,
}

impl NotationDecl {
    pub fn new(name: &str, public_id: Option<&str>, system_id: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            public_id: public_id.map(str::to_string),
            system_id: system_id.map(str::to_string),
        }
    }
}
