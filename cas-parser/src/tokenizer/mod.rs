pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Input the lexer cannot recognize becomes a [`TokenKind::Symbol`] token, so the tokens always
/// cover the whole input and the parser reports the offending span.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let kind = match result {
            Ok(kind) => kind,
            Err(()) => TokenKind::Symbol,
        };
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn call_and_float() {
        compare_tokens(
            "sqrt(x+4)^0.5 $",
            [
                (TokenKind::Name, "sqrt"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "x"),
                (TokenKind::Add, "+"),
                (TokenKind::Int, "4"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Exp, "^"),
                (TokenKind::Float, "0.5"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
            ],
        );
    }

    #[test]
    fn complete_tokens_cover_input() {
        for input in ["x # y", "1.", "2..3 + x", "sin(x) @ \u{0}"] {
            let tokens = tokenize_complete(input);
            let joined = tokens.iter().map(|token| token.lexeme).collect::<String>();
            assert_eq!(joined, input);
        }

        let tokens = tokenize_complete("x # y");
        assert_eq!(tokens[2].kind, TokenKind::Symbol);
        assert_eq!(tokens[2].span, 2..3);
        assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::Name));
    }

    #[test]
    fn implicit_product() {
        compare_tokens(
            "3x",
            [
                (TokenKind::Int, "3"),
                (TokenKind::Name, "x"),
            ],
        );
    }
}
