use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedLanguage {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Swift,
    Sql,
    Rust,
    Ruby,
    Php,
    Kotlin,
    Html,
    Go,
    Css,
    Cpp,
    CSharp,
}

impl SupportedLanguage {
    pub const ALL: [SupportedLanguage; 15] = [
        SupportedLanguage::Python,
        SupportedLanguage::JavaScript,
        SupportedLanguage::TypeScript,
        SupportedLanguage::Java,
        SupportedLanguage::Swift,
        SupportedLanguage::Sql,
        SupportedLanguage::Rust,
        SupportedLanguage::Ruby,
        SupportedLanguage::Php,
        SupportedLanguage::Kotlin,
        SupportedLanguage::Html,
        SupportedLanguage::Go,
        SupportedLanguage::Css,
        SupportedLanguage::Cpp,
        SupportedLanguage::CSharp,
    ];

    /// The tag clients send, after normalisation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedLanguage::Python => "python",
            SupportedLanguage::JavaScript => "javascript",
            SupportedLanguage::TypeScript => "typescript",
            SupportedLanguage::Java => "java",
            SupportedLanguage::Swift => "swift",
            SupportedLanguage::Sql => "sql",
            SupportedLanguage::Rust => "rust",
            SupportedLanguage::Ruby => "ruby",
            SupportedLanguage::Php => "php",
            SupportedLanguage::Kotlin => "kotlin",
            SupportedLanguage::Html => "html",
            SupportedLanguage::Go => "go",
            SupportedLanguage::Css => "css",
            SupportedLanguage::Cpp => "c++",
            SupportedLanguage::CSharp => "c#",
        }
    }
}

impl FromStr for SupportedLanguage {
    type Err = ();

    /// Expects an already normalised tag; see `normalize_language`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        SupportedLanguage::ALL
            .into_iter()
            .find(|lang| lang.as_str() == input)
            .ok_or(())
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn normalize_language(raw: &str) -> String {
    raw.trim().to_lowercase()
}
