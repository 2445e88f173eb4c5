/// Something that can append itself to an [`Accumulator`].
///
/// Plain strings are written as they are. Compiled fragments render
/// themselves recursively into the same buffer.
pub trait Writable {
	fn write_to(&self, output: &mut Accumulator);
}

impl Writable for str {
	fn write_to(&self, output: &mut Accumulator) {
		output.write(self);
	}
}

impl Writable for String {
	fn write_to(&self, output: &mut Accumulator) {
		output.write(self);
	}
}

impl<T: Writable + ?Sized> Writable for &T {
	fn write_to(&self, output: &mut Accumulator) {
		(**self).write_to(output);
	}
}

/// An append-only text buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
	output: String,
}

impl Accumulator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Start from `init` instead of an empty buffer.
	pub fn with(init: impl Into<String>) -> Self {
		Self {
			output: init.into(),
		}
	}

	/// Append `text` and return everything written so far.
	pub fn write(&mut self, text: &str) -> &str {
		self.output.push_str(text);
		&self.output
	}

	/// Write every item in order, following each with a newline when
	/// `newline` is set.
	pub fn write_all<I>(&mut self, items: I, newline: bool) -> &mut Self
	where
		I: IntoIterator,
		I::Item: Writable,
	{
		for item in items {
			item.write_to(self);
			if newline {
				self.output.push('\n');
			}
		}

		self
	}

	pub fn read(&self) -> &str {
		&self.output
	}

	pub fn into_string(self) -> String {
		self.output
	}
}
