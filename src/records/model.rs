use serde::Serialize;

/// One decoded cat entry.
///
/// Records are built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Display label, never empty.
    pub name: String,
    pub id: i64,
    /// URL text as found in the source; validated only when opened.
    pub external_link: String,
    pub description: String,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        id: i64,
        external_link: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        let name = name.into();
        let description = description.unwrap_or_else(|| Self::default_description(&name));
        Self {
            name,
            id,
            external_link: external_link.into(),
            description,
        }
    }

    /// Description used when the source entry has none.
    pub fn default_description(name: &str) -> String {
        format!("Hi I'm {}", name)
    }

    /// Key used to look up the cat's picture among the bundled image assets.
    pub fn asset_key(&self) -> &str {
        &self.name
    }
}
