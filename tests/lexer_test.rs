use farr_lexer::{
    tokenize, LexerBuilder, LineMode, Position, TokenExtIterator, TokenKind, TokenKind as K,
};
use rstest::rstest;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Kind and value of each token, without the final end of file token.
fn lex(text: &str) -> Vec<(TokenKind, String)> {
    init();
    let mut tokens = tokenize(text);
    assert_eq!(tokens.pop().map(|t| t.kind()), Some(K::EndOfFile));
    tokens
        .into_iter()
        .map(|t| (t.kind(), t.value().to_string()))
        .collect()
}

fn expected(tokens: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
    tokens.iter().map(|(k, v)| (*k, v.to_string())).collect()
}

#[rstest]
#[case::two_arguments(
    "@Use([Colors], \"de\")",
    &[(K::Annotation, "Use"), (K::AnnotationArgument, "Colors"), (K::AnnotationArgument, "de")])]
#[case::empty_list("@Use()", &[(K::Annotation, "Use")])]
#[case::trailing_comma("@Use([x],)", &[(K::Annotation, "Use"), (K::AnnotationArgument, "x")])]
#[case::escaped_argument(
    "@Use(\"a\"\"b\")",
    &[(K::Annotation, "Use"), (K::AnnotationArgument, "a\"b")])]
#[case::unclosed_list(
    "@Use([x]",
    &[(K::Annotation, "Use"), (K::Error, "("), (K::AnnotationArgument, "x")])]
#[case::stray_text(
    "@Use(foo, [x])",
    &[(K::Annotation, "Use"), (K::Error, "foo"), (K::AnnotationArgument, "x")])]
#[case::second_open_parens(
    "@Use(([x])",
    &[(K::Annotation, "Use"), (K::Error, "("), (K::AnnotationArgument, "x")])]
#[case::stray_bracket("@Use(])", &[(K::Annotation, "Use"), (K::Error, "]")])]
#[case::missing_argument(
    "@Use(, [x])",
    &[(K::Annotation, "Use"), (K::Error, ","), (K::AnnotationArgument, "x")])]
#[case::missing_comma(
    "@Use([x] [y])",
    &[(K::Annotation, "Use"), (K::AnnotationArgument, "x"), (K::Error, "[y]")])]
#[case::unterminated_argument(
    "@Use(\"x\nB",
    &[(K::Annotation, "Use"), (K::Error, "("), (K::Error, "\"x\n"), (K::Value, "B")])]
#[case::annotation_then_section(
    "@Use [x]",
    &[(K::Annotation, "Use"), (K::Section, "x")])]
fn annotation_arguments(#[case] text: &str, #[case] tokens: &[(TokenKind, &str)]) {
    assert_eq!(lex(text), expected(tokens), "input: {:?}", text);
}

#[rstest]
#[case::lf("I1\n I2\n  I3", &[1, 2, 3])]
#[case::crlf("I1\r\n I2\r\n  I3", &[1, 2, 3])]
#[case::blank_line_lf("I1\n I2\n\n I3", &[1, 2, 2])]
#[case::blank_line_crlf("I1\r\n I2\r\n\r\n I3", &[1, 2, 2])]
#[case::tabs("a\n\tb\n\t\tc\n\td", &[1, 2, 3, 2])]
#[case::large_jump("a\n        b\n c", &[1, 2, 1])]
#[case::item_resets("a\n b\nc\n d", &[1, 2, 1, 2])]
fn nesting_depth(#[case] text: &str, #[case] depths: &[usize]) {
    init();
    let actual = tokenize(text)
        .into_iter()
        .filter(|t| t.kind() == K::Value)
        .map(|t| t.depth())
        .collect::<Vec<_>>();
    assert_eq!(actual, depths, "input: {:?}", text);
}

#[rstest]
#[case::plain("A -> B", &[(K::Value, "A"), (K::Operator, "->"), (K::Value, "B")])]
#[case::label_rhs("A -> [B b]", &[(K::Value, "A"), (K::Operator, "->"), (K::Label, "B b")])]
#[case::illegal_label("A -> [B-b]", &[(K::Value, "A"), (K::Operator, "->"), (K::Error, "[B-b]")])]
#[case::unterminated_regex("/a", &[(K::Error, "/a")])]
#[case::arrow_in_rhs("A -> B -> C", &[(K::Value, "A"), (K::Operator, "->"), (K::Value, "B -> C")])]
#[case::nul_ends_text("A\0B", &[(K::Value, "A")])]
#[case::lone_cr("A\rB", &[(K::Value, "A\rB")])]
#[case::unicode("Grüße -> Hallo", &[(K::Value, "Grüße"), (K::Operator, "->"), (K::Value, "Hallo")])]
fn item_lines(#[case] text: &str, #[case] tokens: &[(TokenKind, &str)]) {
    assert_eq!(lex(text), expected(tokens), "input: {:?}", text);
}

#[test]
fn end_of_file_depth_and_offset() {
    init();
    let tokens = tokenize("a\n  b\n");
    let eof = tokens.last().unwrap();
    assert_eq!(eof.kind(), K::EndOfFile);
    assert_eq!(eof.start(), 6);
    assert_eq!(eof.end(), 6);
    assert_eq!(eof.depth(), 2);
}

#[test]
fn builder_with_trivia_and_positions() {
    init();
    let mut lexer = LexerBuilder::new().emit_trivia(true).build("[S]\r\n\tx -> y\r\n");
    assert_eq!(lexer.line_mode(), LineMode::Header);
    assert_eq!(lexer.read_token().kind(), K::Section);
    let tokens = lexer.tokens().with_positions().collect::<Vec<_>>();
    let kinds = tokens.iter().map(|t| t.token().kind()).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            K::NewLine,
            K::Indent,
            K::Value,
            K::Operator,
            K::Value,
            K::NewLine,
            K::EndOfFile
        ]
    );
    assert_eq!(tokens[1].token().context(), K::Tab);
    assert_eq!(tokens[2].start_position(), Position::new(2, 1));
    assert_eq!(tokens[5].token().value(), "\n");
    assert_eq!(tokens[5].span().len(), 2);
    assert_eq!(tokens[6].start_position(), Position::new(3, 0));
}
