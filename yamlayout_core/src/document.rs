use std::fmt;

use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;
use serde::ser::SerializeSeq;
use serde_json::Number;
use serde_yaml_ng::Value as YamlValue;

use crate::YamlayoutError;
use crate::YamlayoutResult;

/// A parsed layout document.
///
/// Markup is only ever produced from [`Document::Text`], [`Document::List`]
/// and [`Document::Mapping`]. The scalar kinds are carried so that property
/// values keep their type when they are serialized into attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
	Null,
	Bool(bool),
	Number(Number),
	Text(String),
	List(Vec<Document>),
	Mapping(Mapping),
}

impl Document {
	/// Parse yaml source into a document.
	pub fn from_yaml(content: &str) -> YamlayoutResult<Self> {
		Self::from_yaml_at(content, "<input>")
	}

	/// Parse yaml source into a document, naming `path_display` in errors.
	pub fn from_yaml_at(content: &str, path_display: &str) -> YamlayoutResult<Self> {
		let value: YamlValue =
			serde_yaml_ng::from_str(content).map_err(|e| YamlayoutError::Yaml {
				path: path_display.to_string(),
				reason: e.to_string(),
			})?;

		Self::try_from(value)
	}

	/// A short name for the kind of value, used in diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "a boolean",
			Self::Number(_) => "a number",
			Self::Text(_) => "a string",
			Self::List(_) => "a list",
			Self::Mapping(_) => "a mapping",
		}
	}

	/// `null`, `false`, zero and the empty string.
	pub fn is_falsy(&self) -> bool {
		match self {
			Self::Null | Self::Bool(false) => true,
			Self::Number(number) if number.is_f64() => {
				number.as_f64().is_some_and(|float| float == 0.0)
			}
			Self::Number(number) => number.as_i64() == Some(0),
			Self::Text(text) => text.is_empty(),
			Self::Bool(true) | Self::List(_) | Self::Mapping(_) => false,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Returns the value of a mapping that has exactly one entry, keyed by
	/// `key`.
	pub fn sole_value(&self, key: &str) -> Option<&Document> {
		match self {
			Self::Mapping(mapping) => {
				mapping
					.sole_entry()
					.and_then(|(k, value)| (k == key).then_some(value))
			}
			_ => None,
		}
	}
}

impl TryFrom<YamlValue> for Document {
	type Error = YamlayoutError;

	fn try_from(value: YamlValue) -> YamlayoutResult<Self> {
		let document = match value {
			YamlValue::Null => Self::Null,
			YamlValue::Bool(b) => Self::Bool(b),
			YamlValue::Number(number) => Self::Number(yaml_number_to_json(&number)?),
			YamlValue::String(text) => Self::Text(text),
			YamlValue::Sequence(items) => {
				let items: YamlayoutResult<Vec<Document>> =
					items.into_iter().map(Self::try_from).collect();
				Self::List(items?)
			}
			YamlValue::Mapping(entries) => {
				let mut mapping = Mapping::new();
				for (key, value) in entries {
					mapping.insert(yaml_key_to_string(key)?, Self::try_from(value)?);
				}
				Self::Mapping(mapping)
			}
			YamlValue::Tagged(tagged) => Self::try_from(tagged.value)?,
		};

		Ok(document)
	}
}

fn yaml_number_to_json(number: &serde_yaml_ng::Number) -> YamlayoutResult<Number> {
	if let Some(i) = number.as_i64() {
		return Ok(Number::from(i));
	}

	if let Some(u) = number.as_u64() {
		return Ok(Number::from(u));
	}

	let float = number.as_f64().unwrap_or(f64::NAN);
	// Whole floats print without a fraction, so `1.0` and `1e3` become `1`
	// and `1000`.
	if float.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&float) {
		return Ok(Number::from(float as i64));
	}

	Number::from_f64(float).ok_or_else(|| {
		YamlayoutError::UnconvertibleFloat {
			value: number.to_string(),
		}
	})
}

/// Yaml allows any value as a key. Scalars are stringified the way a
/// javascript object would see them; anything else is rejected.
fn yaml_key_to_string(key: YamlValue) -> YamlayoutResult<String> {
	match key {
		YamlValue::String(text) => Ok(text),
		YamlValue::Number(number) => Ok(number.to_string()),
		YamlValue::Bool(b) => Ok(b.to_string()),
		YamlValue::Null => Ok("null".to_string()),
		YamlValue::Tagged(tagged) => yaml_key_to_string(tagged.value),
		other => {
			Err(YamlayoutError::UnsupportedKey {
				key: format!("{other:?}"),
			})
		}
	}
}

impl Serialize for Document {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(b) => serializer.serialize_bool(*b),
			Self::Number(number) => number.serialize(serializer),
			Self::Text(text) => serializer.serialize_str(text),
			Self::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Mapping(mapping) => {
				let mut map = serializer.serialize_map(Some(mapping.len()))?;
				for (key, value) in mapping.iter() {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
		}
	}
}

/// Compact json, with mappings in document order.
impl fmt::Display for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
		f.write_str(&json)
	}
}

impl From<&str> for Document {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for Document {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<bool> for Document {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Document {
	fn from(value: i64) -> Self {
		Self::Number(Number::from(value))
	}
}

impl From<Vec<Document>> for Document {
	fn from(value: Vec<Document>) -> Self {
		Self::List(value)
	}
}

impl From<Mapping> for Document {
	fn from(value: Mapping) -> Self {
		Self::Mapping(value)
	}
}

/// An insertion-ordered mapping with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
	entries: Vec<(String, Document)>,
}

impl Mapping {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a value. An existing key keeps its position and has its value
	/// replaced; the previous value is returned.
	pub fn insert(&mut self, key: impl Into<String>, value: Document) -> Option<Document> {
		let key = key.into();
		if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
			return Some(std::mem::replace(&mut slot.1, value));
		}

		self.entries.push((key, value));
		None
	}

	pub fn get(&self, key: &str) -> Option<&Document> {
		self.entries
			.iter()
			.find_map(|(k, value)| (k == key).then_some(value))
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
		self.entries.iter().map(|(k, value)| (k.as_str(), value))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// The only entry of a single-entry mapping.
	pub fn sole_entry(&self) -> Option<(&str, &Document)> {
		match self.entries.as_slice() {
			[(key, value)] => Some((key.as_str(), value)),
			_ => None,
		}
	}
}

impl<K: Into<String>> FromIterator<(K, Document)> for Mapping {
	fn from_iter<I: IntoIterator<Item = (K, Document)>>(iter: I) -> Self {
		let mut mapping = Self::new();
		for (key, value) in iter {
			mapping.insert(key, value);
		}
		mapping
	}
}
