#[derive(Clone, Debug)]
pub struct Cell {
    pub value: String,
    pub cell_type: CellType,
    pub original_type: Option<DataTypeInfo>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CellType {
    Text,
    Number,
    Date,
    Boolean,
    Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DataTypeInfo {
    Empty,
    String,
    Float(f64),
    Int(i64),
    Bool(bool),
    DateTime(f64),
    DateTimeIso(String),
    DurationIso(String),
    Error,
}

impl Cell {
    /// Builds a cell from display text, guessing its type the way a hand-typed
    /// value would be read.
    pub fn new(value: String) -> Self {
        let cell_type = if value.is_empty() {
            CellType::Empty
        } else if value.parse::<f64>().is_ok() {
            CellType::Number
        } else if value == "TRUE" || value == "FALSE" || value == "true" || value == "false" {
            CellType::Boolean
        } else {
            CellType::Text
        };

        Self::new_with_type(value, cell_type, None)
    }

    pub fn new_with_type(
        value: String,
        cell_type: CellType,
        original_type: Option<DataTypeInfo>,
    ) -> Self {
        Self {
            value,
            cell_type,
            original_type,
        }
    }

    pub fn empty() -> Self {
        Self {
            value: String::new(),
            cell_type: CellType::Empty,
            original_type: Some(DataTypeInfo::Empty),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_type_from_text() {
        assert_eq!(Cell::new("1920".to_string()).cell_type, CellType::Number);
        assert_eq!(Cell::new("TRUE".to_string()).cell_type, CellType::Boolean);
        assert_eq!(Cell::new("Acme".to_string()).cell_type, CellType::Text);
        assert_eq!(Cell::new(String::new()).cell_type, CellType::Empty);
    }

    #[test]
    fn whitespace_only_cell_counts_as_empty() {
        assert!(Cell::new("   ".to_string()).is_empty());
        assert!(!Cell::new(" x ".to_string()).is_empty());
    }
}
