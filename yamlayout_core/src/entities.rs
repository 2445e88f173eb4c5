/// Encodes text for use as an attribute name.
///
/// Any `Fn(&str) -> String` is an encoder, so a closure can be handed to
/// [`Compiler::with_encoder`](crate::Compiler::with_encoder) directly.
pub trait EntityEncoder {
	fn encode(&self, text: &str) -> String;
}

impl<F> EntityEncoder for F
where
	F: Fn(&str) -> String,
{
	fn encode(&self, text: &str) -> String {
		self(text)
	}
}

/// The default encoder. Markup-significant characters become named entities
/// and anything outside ascii becomes a decimal character reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlEntities;

impl EntityEncoder for HtmlEntities {
	fn encode(&self, text: &str) -> String {
		let mut encoded = String::with_capacity(text.len());
		for ch in text.chars() {
			match ch {
				'&' => encoded.push_str("&amp;"),
				'<' => encoded.push_str("&lt;"),
				'>' => encoded.push_str("&gt;"),
				'"' => encoded.push_str("&quot;"),
				'\'' => encoded.push_str("&apos;"),
				ch if ch.is_ascii() => encoded.push(ch),
				ch => encoded.push_str(&format!("&#{};", u32::from(ch))),
			}
		}
		encoded
	}
}
