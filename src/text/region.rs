/// A Region is a block of rendered text viewed as lines. Operations mutate
/// in place and return `&mut Self` so they chain; the string is only joined
/// back together in `apply()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    lines: Vec<String>,
}

impl Region {
    /// Create a region from a multiline &str (split on "\n"). The empty
    /// string yields an empty region.
    pub fn from_str(s: &str) -> Self {
        let lines = if s.is_empty() {
            Vec::new()
        } else {
            s.split('\n').map(str::to_owned).collect()
        };
        Region { lines }
    }

    /// Add a prefix to every line, blank lines included.
    pub fn prefix_each_line(&mut self, prefix: &str) -> &mut Self {
        for line in &mut self.lines {
            line.insert_str(0, prefix);
        }
        self
    }

    /// Quote the region the way MarkdownV2 block quotes are written: every
    /// line starts with `>`, blank lines become a bare `>`.
    pub fn quote(&mut self) -> &mut Self {
        self.prefix_each_line(">")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join the lines with '\n'.
    pub fn apply(&self) -> String {
        self.lines.join("\n")
    }
}
