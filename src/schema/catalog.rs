use serde::{Deserialize, Serialize};

/// A document type: a display name plus the ordered field names whose
/// values a record of this type carries.
///
/// Field names are free-form. They are matched against template
/// placeholders and drive the generator heuristics, so "birth location"
/// and "price number 1" mean something to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocType {
    pub name: String,
    pub fields: Vec<String>,
}

impl DocType {
    pub fn new(name: &str, fields: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// The fixed, ordered list of document types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCatalog {
    types: Vec<DocType>,
}

impl TypeCatalog {
    pub fn new(types: Vec<DocType>) -> Self {
        Self { types }
    }

    /// The catalog compiled into the engine.
    pub fn builtin() -> Self {
        Self::new(vec![
            DocType::new(
                "Companies",
                &[
                    "name",
                    "year",
                    "location",
                    "founder",
                    "number",
                    "product",
                    "employee count",
                    "product 1",
                    "product 2",
                    "product 3",
                    "product",
                    "dollars",
                ],
            ),
            DocType::new(
                "Artists",
                &[
                    "name",
                    "date",
                    "location",
                    "year",
                    "nickname",
                    "concert 1",
                    "concert 2",
                    "concert 3",
                    "song 1",
                    "song 2",
                    "song 3",
                    "birth location",
                ],
            ),
            DocType::new(
                "Products",
                &[
                    "product name",
                    "year",
                    "price number 1",
                    "price number 2",
                    "price number 3",
                    "person name",
                    "location",
                    "company name",
                    "collab name",
                    "generic email",
                    "phone number",
                    "brand company",
                ],
            ),
            DocType::new(
                "Politicians",
                &[
                    "birth date",
                    "name",
                    "allied faction",
                    "main country",
                    "other faction",
                    "country 1",
                    "country 2",
                    "date 1",
                    "date 2",
                    "university name",
                    "birth location",
                    "date 3",
                ],
            ),
            DocType::new(
                "Researchers",
                &[
                    "university 1",
                    "date",
                    "name",
                    "science field 1",
                    "science field 2",
                    "birth date",
                    "birth location",
                    "researcher name",
                    "prize name",
                    "journal name 1",
                    "university 2",
                    "country",
                ],
            ),
        ])
    }

    pub fn get(&self, index: usize) -> Option<&DocType> {
        self.types.get(index)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocType> {
        self.types.iter()
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_shape() {
        let catalog = TypeCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        for ty in catalog.iter() {
            assert_eq!(ty.fields.len(), 12, "type {} has wrong field count", ty.name);
        }
        assert_eq!(catalog.get(2).unwrap().name, "Products");
        assert!(catalog.get(5).is_none());
    }
}
