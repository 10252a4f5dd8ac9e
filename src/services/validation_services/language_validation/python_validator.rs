use async_trait::async_trait;
use tree_sitter::{Node, Parser};

use super::validator::SyntaxValidator;
use crate::models::{error_models::ValidatorError, validation_models::Verdict};

pub const PYTHON_VALID_MESSAGE: &str = "Código Python válido.";
pub const PYTHON_ERROR_PREFIX: &str = "Error de sintaxis en Python: ";

/// Parses the snippet in-process with the tree-sitter Python grammar.
pub struct PythonValidator;

impl PythonValidator {
    fn check(code: &str) -> Result<Verdict, ValidatorError> {
        let mut parser = Parser::new();
        parser
            .set_language(tree_sitter_python::language())
            .map_err(|e| ValidatorError::Parser(format!("Set lang error: {:?}", e)))?;

        let tree = parser
            .parse(code, None)
            .ok_or_else(|| ValidatorError::Parser("Failed to parse Python code".to_string()))?;

        let root_node = tree.root_node();
        if root_node.has_error() {
            let detail = match first_error(root_node) {
                Some(node) => describe(node),
                None => "invalid syntax".to_string(),
            };
            return Ok(Verdict::invalid(format!("{}{}", PYTHON_ERROR_PREFIX, detail)));
        }

        // The grammar still accepts Python 2 statements and literals.
        if let Some((node, reason)) = first_legacy_construct(root_node, code.as_bytes()) {
            let position = node.start_position();
            return Ok(Verdict::invalid(format!(
                "{}{} (line {}, column {})",
                PYTHON_ERROR_PREFIX,
                reason,
                position.row + 1,
                position.column + 1
            )));
        }

        Ok(Verdict::valid(PYTHON_VALID_MESSAGE))
    }
}

#[async_trait]
impl SyntaxValidator for PythonValidator {
    async fn validate(&self, code: &str) -> Result<Verdict, ValidatorError> {
        PythonValidator::check(code)
    }
}

/// Depth-first, skipping subtrees that carry no error.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

fn describe(node: Node<'_>) -> String {
    if node.is_missing() {
        let position = node.start_position();
        return format!(
            "missing \"{}\" (line {}, column {})",
            node.kind(),
            position.row + 1,
            position.column + 1
        );
    }
    let position = offending_token(node).start_position();
    format!(
        "invalid syntax (line {}, column {})",
        position.row + 1,
        position.column + 1
    )
}

/// An ERROR node usually wraps the partial statement that preceded the bad
/// token, so point at the last token on the line where it starts.
fn offending_token(error: Node<'_>) -> Node<'_> {
    let row = error.start_position().row;
    let mut leaves = Vec::new();
    collect_leaves(error, &mut leaves);
    leaves
        .into_iter()
        .rev()
        .find(|leaf| leaf.start_position().row == row)
        .unwrap_or(error)
}

fn collect_leaves<'a>(node: Node<'a>, leaves: &mut Vec<Node<'a>>) {
    if node.child_count() == 0 {
        leaves.push(node);
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_leaves(child, leaves);
    }
}

/// Python 2 syntax that parses cleanly but is rejected by Python 3.
fn first_legacy_construct<'a>(node: Node<'a>, source: &[u8]) -> Option<(Node<'a>, &'static str)> {
    let reason = match node.kind() {
        "print_statement" => {
            Some("Missing parentheses in call to 'print'. Did you mean print(...)?")
        }
        "exec_statement" => {
            Some("Missing parentheses in call to 'exec'. Did you mean exec(...)?")
        }
        "<>" if !node.is_named() => Some("invalid syntax"),
        "except_clause" if has_direct_comma(node) => {
            Some("multiple exception types must be parenthesized")
        }
        "integer" => node.utf8_text(source).ok().and_then(legacy_integer),
        _ => None,
    };
    if let Some(reason) = reason {
        return Some((node, reason));
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_legacy_construct(child, source) {
            return Some(found);
        }
    }
    None
}

fn has_direct_comma(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == ",")
}

fn legacy_integer(text: &str) -> Option<&'static str> {
    if text.ends_with(['l', 'L']) {
        return Some("invalid decimal literal");
    }
    if text.ends_with(['j', 'J']) {
        return None;
    }
    let octal_style = text.len() > 1
        && text.starts_with('0')
        && text.bytes().all(|b| b.is_ascii_digit() || b == b'_')
        && text.bytes().any(|b| (b'1'..=b'9').contains(&b));
    if octal_style {
        return Some(
            "leading zeros in decimal integer literals are not permitted; \
             use an 0o prefix for octal integers",
        );
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn verdict(code: &str) -> Verdict {
        PythonValidator.validate(code).await.unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_module() {
        let v = verdict("def greet(name):\n    return f\"hola {name}\"\n\nprint(greet('x'))\n").await;
        assert!(v.valid);
        assert_eq!(v.message, PYTHON_VALID_MESSAGE);
    }

    #[tokio::test]
    async fn accepts_empty_snippet() {
        assert!(verdict("").await.valid);
    }

    #[tokio::test]
    async fn rejects_broken_parameter_list() {
        let v = verdict("def f(:").await;
        assert!(!v.valid);
        assert!(v.message.starts_with(PYTHON_ERROR_PREFIX), "{}", v.message);
        assert!(v.message.contains("line 1"), "{}", v.message);
    }

    #[tokio::test]
    async fn reports_line_of_first_error() {
        let v = verdict("x = 1\ny = 2\nif y == :\n    pass\n").await;
        assert!(!v.valid);
        assert!(v.message.contains("line 3"), "{}", v.message);
    }

    #[tokio::test]
    async fn rejects_unclosed_call() {
        let v = verdict("print('hola'\n").await;
        assert!(!v.valid);
        assert!(v.message.len() > PYTHON_ERROR_PREFIX.len());
    }

    #[tokio::test]
    async fn points_at_the_dangling_operator() {
        let v = verdict("x = 1 +\n").await;
        assert!(!v.valid);
        assert!(v.message.contains("line 1"), "{}", v.message);
        assert!(!v.message.contains("column 1)"), "{}", v.message);
    }

    #[tokio::test]
    async fn rejects_print_statement() {
        let v = verdict("print \"hola\"\n").await;
        assert!(!v.valid);
        assert!(
            v.message.contains("Missing parentheses in call to 'print'"),
            "{}",
            v.message
        );
    }

    #[tokio::test]
    async fn rejects_exec_statement() {
        let v = verdict("exec \"x = 1\"\n").await;
        assert!(!v.valid);
        assert!(v.message.contains("'exec'"), "{}", v.message);
    }

    #[tokio::test]
    async fn accepts_print_and_exec_calls() {
        assert!(verdict("print(\"hola\")\n").await.valid);
        assert!(verdict("exec(\"x = 1\")\n").await.valid);
    }

    #[tokio::test]
    async fn rejects_diamond_operator() {
        let v = verdict("ok = 1 <> 2\n").await;
        assert!(!v.valid);
        assert!(v.message.starts_with(PYTHON_ERROR_PREFIX), "{}", v.message);
    }

    #[tokio::test]
    async fn rejects_comma_in_except_clause() {
        let v = verdict("try:\n    pass\nexcept ValueError, e:\n    pass\n").await;
        assert!(!v.valid);
        assert!(v.message.contains("line 3"), "{}", v.message);
    }

    #[tokio::test]
    async fn accepts_parenthesized_exception_tuple() {
        let code = "try:\n    pass\nexcept (ValueError, KeyError) as e:\n    pass\n";
        assert!(verdict(code).await.valid);
    }

    #[tokio::test]
    async fn octal_literals_need_a_prefix() {
        assert!(!verdict("mode = 0777\n").await.valid);
        assert!(verdict("mode = 0o777\nzero = 00\nimag = 0777j\n").await.valid);
    }
}
