//! Emission context: an indented output buffer.

/// Output buffer for generated C++ text.
#[derive(Debug, Default)]
pub struct CodegenContext {
    /// Current indentation level.
    indent: usize,
    /// Generated code output.
    output: String,
    /// Counter for generating unique temporary names.
    temp_counter: u32,
}

impl CodegenContext {
    pub fn new() -> Self {
        Self {
            indent: 0,
            output: String::with_capacity(4096),
            temp_counter: 0,
        }
    }

    /// An empty buffer one level deeper than `self`, for text that is only
    /// kept if it is completed. Merge it back with [`absorb`](Self::absorb).
    pub fn nested(&self) -> Self {
        Self {
            indent: self.indent + 1,
            output: String::new(),
            temp_counter: self.temp_counter,
        }
    }

    /// Append a nested buffer's text and keep its temporaries reserved.
    pub fn absorb(&mut self, nested: CodegenContext) {
        self.output.push_str(&nested.output);
        self.temp_counter = self.temp_counter.max(nested.temp_counter);
    }

    /// Generate a unique temporary variable name, for bodies that loop or
    /// take the address of a member.
    pub fn fresh_temp(&mut self) -> String {
        let n = self.temp_counter;
        self.temp_counter += 1;
        format!("_t{n}")
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.indent
    }

    /// Write indentation to output.
    pub fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
    }

    /// Write a string to output.
    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Write a line to output (with indentation and newline).
    pub fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// Write a newline.
    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Take the generated output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

#[cfg(test)]
mod tests;
