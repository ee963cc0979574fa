//! Ordered HTML attribute lists for opening tags.
//!
//! Insertion order is preserved in the serialized output, so callers (and
//! hooks) control exactly how attributes appear. Boolean attributes like
//! `disabled` and `checked` are stored without a value and render bare.

/// One attribute. `value == None` renders as a bare boolean attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

/// An insertion-ordered mapping of attribute name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    attrs: Vec<Attribute>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing an existing entry in place (order is
    /// kept) or appending a new one.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = Some(value.into());
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            attr.value = value;
        } else {
            self.attrs.push(Attribute {
                name: name.to_string(),
                value,
            });
        }
    }

    /// Set a boolean attribute (rendered without a value).
    pub fn set_flag(&mut self, name: &str) {
        if !self.attrs.iter().any(|a| a.name == name) {
            self.attrs.push(Attribute {
                name: name.to_string(),
                value: None,
            });
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| a.value.as_deref())
    }

    pub fn remove(&mut self, name: &str) {
        self.attrs.retain(|a| a.name != name);
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Serialize for splicing into an opening tag. Non-empty output starts
    /// with a space: ` class="task-list-item" disabled`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for attr in &self.attrs {
            out.push(' ');
            out.push_str(&attr.name);
            if let Some(value) = &attr.value {
                out.push('=');
                out.push('"');
                out.push_str(&value.replace('"', "&quot;"));
                out.push('"');
            }
        }
        out
    }
}
