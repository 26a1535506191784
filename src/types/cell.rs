use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{CellStyle, Id};

/// A single cell declaration.
///
/// `text` and `value` are the common payload every template understands;
/// template-specific fields (e.g. `checked`) live in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Template name, e.g. `text`, `number`, `header`
    #[serde(rename = "type", default)]
    pub cell_type: String,
    #[serde(default)]
    pub text: String,
    /// Numeric value; `NaN` when the cell has none (serialized as `null`)
    #[serde(default = "nan", with = "nan_as_null")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub non_editable: bool,
    /// Cells only overwrite each other on fill/paste when their groups match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rowspan: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colspan: Option<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn nan() -> f64 {
    f64::NAN
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

mod nan_as_null {
    use super::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
        if v.is_nan() {
            s.serialize_none()
        } else {
            s.serialize_some(v)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(d)?.unwrap_or(f64::NAN))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

impl Cell {
    /// The sentinel written into cleared cells (cut, wipe).
    pub fn empty() -> Self {
        Self::with_type("text")
    }

    pub fn with_type(cell_type: impl Into<String>) -> Self {
        Self {
            cell_type: cell_type.into(),
            text: String::new(),
            value: f64::NAN,
            non_editable: false,
            group_id: None,
            style: None,
            class_name: None,
            rowspan: None,
            colspan: None,
            extra: Map::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: parse_number(&text),
            text,
            ..Self::with_type("text")
        }
    }

    pub fn number(value: f64) -> Self {
        Self {
            text: format_number(value),
            value,
            ..Self::with_type("number")
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::with_type("header")
        }
    }

    pub fn checkbox(checked: bool) -> Self {
        let mut cell = Self::with_type("checkbox");
        cell.set_flag("checked", checked);
        cell.value = if checked { 1.0 } else { 0.0 };
        cell.text = checked.to_string();
        cell
    }

    #[must_use]
    pub fn with_group(mut self, group_id: impl Into<Id>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    #[must_use]
    pub fn with_span(mut self, rowspan: usize, colspan: usize) -> Self {
        self.rowspan = Some(rowspan);
        self.colspan = Some(colspan);
        self
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.non_editable = true;
        self
    }

    /// Read a boolean template field from `extra`.
    pub fn flag(&self, key: &str) -> bool {
        self.extra.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn set_flag(&mut self, key: &str, on: bool) {
        self.extra.insert(key.to_string(), Value::Bool(on));
    }

    pub fn row_span(&self) -> usize {
        self.rowspan.unwrap_or(1).max(1)
    }

    pub fn col_span(&self) -> usize {
        self.colspan.unwrap_or(1).max(1)
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.cell_type == other.cell_type
            && self.text == other.text
            && same_number(self.value, other.value)
            && self.non_editable == other.non_editable
            && self.group_id == other.group_id
            && self.style == other.style
            && self.class_name == other.class_name
            && self.rowspan == other.rowspan
            && self.colspan == other.colspan
            && self.extra == other.extra
    }
}

/// Value equality where two missing numbers (`NaN`) are the same.
#[allow(clippy::float_cmp)]
pub fn same_number(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

/// Lenient numeric parse: leading/trailing whitespace ignored, `NaN` on failure.
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Shortest decimal rendering; integers print without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_deserializes_as_nan() {
        let cell: Cell = serde_json::from_str(r#"{"type":"text","text":"hi"}"#).unwrap();
        assert!(cell.value.is_nan());
        assert_eq!(cell.text, "hi");
    }

    #[test]
    fn nan_serializes_as_null_and_keeps_extra_fields() {
        let mut cell = Cell::text("a");
        cell.extra.insert("placeholder".into(), Value::from("…"));
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["value"], Value::Null);
        assert_eq!(json["placeholder"], Value::from("…"));
        let back: Cell = serde_json::from_value(json).unwrap();
        assert_eq!(back, cell);
    }

    #[test]
    fn equality_treats_nan_as_equal() {
        assert_eq!(Cell::empty(), Cell::empty());
        assert_ne!(Cell::number(1.0), Cell::number(2.0));
    }

    #[test]
    fn number_text_is_shortest_form() {
        assert_eq!(Cell::number(4.0).text, "4");
        assert_eq!(Cell::number(2.5).text, "2.5");
    }

    #[test]
    fn spans_default_to_one() {
        assert_eq!(Cell::text("x").row_span(), 1);
        assert_eq!(Cell::text("x").with_span(2, 3).col_span(), 3);
    }
}
