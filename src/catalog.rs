//! Catalog selection.
//!
//! The catalog is picked either by typing its name into a text field or by checking one option in a radio group.

use crate::error::{Error, Result};

/// One option in a catalog radio group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioOption {
    pub value: String,
    pub checked: bool,
}

/// The form control the catalog is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogInput {
    Text(String),
    Radio(Vec<RadioOption>),
}

/// A selected catalog, sent to the backend as the `Catalog` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSelection(String);

impl RadioOption {
    pub fn new<S>(value: S, checked: bool) -> Self
    where
        S: Into<String>,
    {
        Self {
            value: value.into(),
            checked,
        }
    }
}

impl CatalogInput {
    /// Builds a radio group from option values, with at most the option at `checked` checked.
    pub fn radio<I, S>(values: I, checked: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Radio(
            values
                .into_iter()
                .enumerate()
                .map(|(index, value)| RadioOption::new(value, Some(index) == checked))
                .collect(),
        )
    }

    /// Returns the selected catalog. A radio group must have exactly one checked option and a text field must not be
    /// empty, otherwise [Error::NoCatalogSelected] is returned.
    pub fn selection(&self) -> Result<CatalogSelection> {
        match self {
            Self::Text(value) => CatalogSelection::new(value.as_str()),

            Self::Radio(options) => {
                let mut checked = options.iter().filter(|option| option.checked);

                match (checked.next(), checked.next()) {
                    (Some(option), None) => CatalogSelection::new(option.value.as_str()),
                    _ => Err(Error::NoCatalogSelected),
                }
            }
        }
    }
}

impl CatalogSelection {
    pub fn new<S>(catalog: S) -> Result<Self>
    where
        S: Into<String>,
    {
        let catalog = catalog.into();

        if catalog.trim().is_empty() {
            Err(Error::NoCatalogSelected)
        } else {
            Ok(Self(catalog))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_field() {
        let selection = CatalogInput::Text("Master_Catalog.csv".to_owned()).selection().unwrap();
        assert_eq!(selection.as_str(), "Master_Catalog.csv");
    }

    #[test]
    fn empty_text_field() {
        assert!(matches!(
            CatalogInput::Text("  ".to_owned()).selection(),
            Err(Error::NoCatalogSelected)
        ));
    }

    #[test]
    fn radio_single_checked() {
        let input = CatalogInput::radio(["Master", "Chill", "Workout"], Some(1));
        assert_eq!(input.selection().unwrap().as_str(), "Chill");
    }

    #[test]
    fn radio_none_checked() {
        let input = CatalogInput::radio(["Master", "Chill"], None);
        assert!(matches!(input.selection(), Err(Error::NoCatalogSelected)));
    }

    #[test]
    fn radio_many_checked() {
        let input = CatalogInput::Radio(vec![RadioOption::new("Master", true), RadioOption::new("Chill", true)]);
        assert!(matches!(input.selection(), Err(Error::NoCatalogSelected)));
    }

    #[test]
    fn empty_radio_group() {
        assert!(matches!(
            CatalogInput::Radio(Vec::new()).selection(),
            Err(Error::NoCatalogSelected)
        ));
    }
}
