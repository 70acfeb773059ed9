//! A parser for the DIMACS CNF format, extended with XOR lines. Given that DIMACS files can be
//! very large, the file is read in chunks, and the buffers are reused rather than allocated for
//! every clause.
//!
//! Besides the usual clauses, a line starting with `x` holds a parity constraint: `x1 -2 3 0`
//! states that `1 XOR -2 XOR 3` is true, so that an odd number of its literals is true. Parity
//! lines count towards the number of clauses given in the header.
//!
//! The parser operates on a type which implements [`DimacsSink`]; it should not be used as a
//! DIMACS validator, as its errors are not very detailed.
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::num::NonZeroI32;
use std::str::FromStr;

use gourd_solver::Formula;
use thiserror::Error;

/// Receives the constraints of a DIMACS file as they are parsed.
pub(crate) trait DimacsSink {
    /// Creates a sink for a formula over `num_variables` variables.
    fn empty(num_variables: usize) -> Self;

    fn add_hard_clause(&mut self, clause: &[NonZeroI32]);

    /// Adds the constraint that an odd number of `literals` is true.
    fn add_xor(&mut self, literals: &[NonZeroI32]);
}

#[derive(Debug, Error)]
pub(crate) enum DimacsParseError {
    #[error("failed to read file")]
    Io(#[from] std::io::Error),

    #[error("missing dimacs header")]
    MissingHeader,

    #[error("'{0}' is an invalid header")]
    InvalidHeader(String),

    #[error("multiple dimacs headers found")]
    DuplicateHeader,

    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("'{0}' is an invalid DIMACS literal")]
    InvalidLiteral(String),

    #[error("the last clause in the source is not terminated with a '0'")]
    UnterminatedClause,

    #[error("expected to parse {expected} clauses, but parsed {parsed}")]
    IncorrectClauseCount { expected: usize, parsed: usize },
}

pub(crate) fn parse_cnf<Sink: DimacsSink>(source: impl Read) -> Result<Sink, DimacsParseError> {
    let mut reader = BufReader::new(source);
    let mut parser = DimacsParser::<Sink>::default();

    loop {
        let num_bytes = {
            let data = reader.fill_buf()?;

            if data.is_empty() {
                return parser.complete();
            }

            parser.parse_chunk(data)?;
            data.len()
        };

        reader.consume(num_bytes);
    }
}

struct DimacsParser<Sink> {
    sink: Option<Sink>,
    header: Option<CnfHeader>,
    buffer: String,
    clause: Vec<NonZeroI32>,
    /// Whether the constraint being parsed started with an `x`.
    is_xor: bool,
    state: ParseState,
    parsed_clauses: usize,
}

impl<Sink> Default for DimacsParser<Sink> {
    fn default() -> Self {
        DimacsParser {
            sink: None,
            header: None,
            buffer: String::new(),
            clause: vec![],
            is_xor: false,
            state: ParseState::StartLine,
            parsed_clauses: 0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum ParseState {
    StartLine,
    Header,
    Comment,
    Literal,
    NegativeLiteral,
    Clause,
}

impl<Sink: DimacsSink> DimacsParser<Sink> {
    /// Parses the next chunk of bytes. This may start in the middle of parsing a clause or the
    /// header, and may end in such a state as well.
    fn parse_chunk(&mut self, chunk: &[u8]) -> Result<(), DimacsParseError> {
        for &byte in chunk {
            match self.state {
                ParseState::StartLine => match byte {
                    b if b.is_ascii_whitespace() => {}

                    b'p' => {
                        self.state = ParseState::Header;
                        self.buffer.clear();
                        self.buffer.push('p');
                    }

                    b'c' => self.state = ParseState::Comment,

                    // A parity line cannot continue a clause from a previous line.
                    b'x' if self.clause.is_empty() => {
                        self.is_xor = true;
                        self.state = ParseState::Clause;
                    }

                    b @ b'1'..=b'9' => self.start_literal(b, true),

                    // An empty clause, or the end of a clause spanning multiple lines.
                    b'0' => self.finish_clause()?,

                    b'-' => self.start_literal(b'-', false),

                    b => return Err(DimacsParseError::UnexpectedCharacter(b as char)),
                },

                ParseState::Header => match byte {
                    b'\n' => {
                        self.init_formula()?;
                        self.state = ParseState::StartLine;
                    }

                    b => self.buffer.push(b as char),
                },

                ParseState::Comment => {
                    if byte == b'\n' {
                        self.state = ParseState::StartLine;
                    }
                }

                ParseState::Literal => match byte {
                    b if b.is_ascii_whitespace() => {
                        self.finish_literal()?;
                        if b == b'\n' {
                            self.state = ParseState::StartLine;
                        }
                    }

                    b @ b'0'..=b'9' => self.buffer.push(b as char),

                    b => return Err(DimacsParseError::UnexpectedCharacter(b as char)),
                },

                ParseState::NegativeLiteral => match byte {
                    b @ b'1'..=b'9' => {
                        self.buffer.push(b as char);
                        self.state = ParseState::Literal;
                    }

                    b => return Err(DimacsParseError::UnexpectedCharacter(b as char)),
                },

                ParseState::Clause => match byte {
                    b'0' => self.finish_clause()?,

                    // A new line does not terminate the clause, which stays in the buffer while
                    // comments and leading whitespace of the next line are handled.
                    b'\n' => self.state = ParseState::StartLine,
                    b if b.is_ascii_whitespace() => {}

                    b @ b'1'..=b'9' => self.start_literal(b, true),
                    b'-' => self.start_literal(b'-', false),

                    b => return Err(DimacsParseError::UnexpectedCharacter(b as char)),
                },
            }
        }

        Ok(())
    }

    fn start_literal(&mut self, byte: u8, is_positive: bool) {
        self.state = if is_positive {
            ParseState::Literal
        } else {
            ParseState::NegativeLiteral
        };

        self.buffer.clear();
        self.buffer.push(byte as char);
    }

    fn complete(mut self) -> Result<Sink, DimacsParseError> {
        match self.state {
            ParseState::Literal => self.finish_literal()?,
            ParseState::Header => self.init_formula()?,
            _ => {}
        }
        let (Some(sink), Some(header)) = (self.sink, self.header) else {
            return Err(DimacsParseError::MissingHeader);
        };

        if !self.clause.is_empty() || self.is_xor {
            Err(DimacsParseError::UnterminatedClause)
        } else if header.num_clauses != self.parsed_clauses {
            Err(DimacsParseError::IncorrectClauseCount {
                expected: header.num_clauses,
                parsed: self.parsed_clauses,
            })
        } else {
            Ok(sink)
        }
    }

    fn init_formula(&mut self) -> Result<(), DimacsParseError> {
        if self.header.is_some() {
            return Err(DimacsParseError::DuplicateHeader);
        }
        let header = self.buffer.trim().parse::<CnfHeader>()?;

        self.sink = Some(Sink::empty(header.num_variables));
        self.header = Some(header);

        Ok(())
    }

    fn finish_literal(&mut self) -> Result<(), DimacsParseError> {
        let literal = self
            .buffer
            .parse::<i32>()
            .ok()
            .and_then(NonZeroI32::new)
            .ok_or_else(|| DimacsParseError::InvalidLiteral(self.buffer.clone()))?;

        self.clause.push(literal);
        self.state = ParseState::Clause;

        Ok(())
    }

    fn finish_clause(&mut self) -> Result<(), DimacsParseError> {
        let sink = self.sink.as_mut().ok_or(DimacsParseError::MissingHeader)?;

        if self.is_xor {
            sink.add_xor(&self.clause);
        } else {
            sink.add_hard_clause(&self.clause);
        }
        self.parsed_clauses += 1;
        self.clause.clear();
        self.is_xor = false;

        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct CnfHeader {
    num_variables: usize,
    num_clauses: usize,
}

impl FromStr for CnfHeader {
    type Err = DimacsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DimacsParseError::InvalidHeader(s.to_owned());

        let mut components = s.split_whitespace();
        if components.next() != Some("p") || components.next() != Some("cnf") {
            return Err(invalid());
        }

        let mut next_number = || {
            components
                .next()
                .and_then(|component| component.parse::<usize>().ok())
                .ok_or_else(invalid)
        };
        let num_variables = next_number()?;
        let num_clauses = next_number()?;

        if components.next().is_some() {
            return Err(invalid());
        }

        Ok(CnfHeader {
            num_variables,
            num_clauses,
        })
    }
}

impl DimacsSink for Formula {
    fn empty(num_variables: usize) -> Self {
        Formula::with_num_variables(num_variables as u32)
    }

    fn add_hard_clause(&mut self, clause: &[NonZeroI32]) {
        let literals = clause.iter().map(|literal| literal.get()).collect::<Vec<_>>();
        self.add_clause(&literals);
    }

    fn add_xor(&mut self, literals: &[NonZeroI32]) {
        let literals = literals
            .iter()
            .map(|literal| literal.get())
            .collect::<Vec<_>>();
        self.add_parity(&literals, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Constraints(Vec<(Vec<i32>, bool)>);

    impl DimacsSink for Constraints {
        fn empty(_: usize) -> Self {
            Constraints::default()
        }

        fn add_hard_clause(&mut self, clause: &[NonZeroI32]) {
            self.0
                .push((clause.iter().map(|lit| lit.get()).collect(), false));
        }

        fn add_xor(&mut self, literals: &[NonZeroI32]) {
            self.0
                .push((literals.iter().map(|lit| lit.get()).collect(), true));
        }
    }

    fn parse_cnf_source(source: &str) -> Vec<Vec<i32>> {
        parse_cnf::<Constraints>(source.as_bytes())
            .expect("valid dimacs")
            .0
            .into_iter()
            .map(|(literals, is_xor)| {
                assert!(!is_xor);
                literals
            })
            .collect()
    }

    fn get_cnf_parse_error(source: &str) -> DimacsParseError {
        parse_cnf::<Constraints>(source.as_bytes()).expect_err("invalid dimacs")
    }

    #[test]
    fn basic_instance_is_read() {
        let source = "p cnf 2 2\n1 -2 0\n-1 2 0";
        let formula = parse_cnf_source(source);

        assert_eq!(vec![vec![1, -2], vec![-1, 2]], formula);
    }

    #[test]
    fn instance_with_two_character_codes_is_accepted() {
        let source = "p cnf 11 2\n1 -2 10 0\n-1 2 -11 0";
        let formula = parse_cnf_source(source);

        assert_eq!(vec![vec![1, -2, 10], vec![-1, 2, -11]], formula);
    }

    #[test]
    fn comments_are_ignored() {
        let source = "c this is\nc a comment\np cnf 2 2\n1 -2 0\nc within the file\n-1 2 0\n";
        let formula = parse_cnf_source(source);

        assert_eq!(vec![vec![1, -2], vec![-1, 2]], formula);
    }

    #[test]
    fn whitespace_and_empty_lines_are_ignored() {
        let source = r#"

            p  cnf 2   2


             1 -2 0

            -1  2 0
        "#;

        let formula = parse_cnf_source(source);

        assert_eq!(vec![vec![1, -2], vec![-1, 2]], formula);
    }

    #[test]
    fn clauses_on_same_line_are_separated() {
        let source = "p cnf 2 2\n1 -2 0 -1 2 0";
        let formula = parse_cnf_source(source);

        assert_eq!(vec![vec![1, -2], vec![-1, 2]], formula);
    }

    #[test]
    fn new_lines_do_not_terminate_clause() {
        let source = "p cnf 2 2\n1\n-2 0 -1 2\n 0";
        let formula = parse_cnf_source(source);

        assert_eq!(vec![vec![1, -2], vec![-1, 2]], formula);
    }

    #[test]
    fn empty_clauses_are_read() {
        let source = "p cnf 1 2\n1 0\n0\n";
        let formula = parse_cnf_source(source);

        assert_eq!(vec![vec![1], vec![]], formula);
    }

    #[test]
    fn xor_lines_are_parity_constraints() {
        let source = "p cnf 3 3\n1 2 0\nx1 -2 3 0\nx -3 2 0\n";
        let constraints = parse_cnf::<Constraints>(source.as_bytes())
            .expect("valid dimacs")
            .0;

        assert_eq!(
            vec![
                (vec![1, 2], false),
                (vec![1, -2, 3], true),
                (vec![-3, 2], true)
            ],
            constraints
        );
    }

    #[test]
    fn xor_lines_become_odd_parity() {
        let source = "p cnf 3 2\n1 2 0\nx1 -2 3 0\n";
        let formula = parse_cnf::<Formula>(source.as_bytes()).expect("valid dimacs");

        let mut expected = Formula::with_num_variables(3);
        expected.add_clause(&[1, 2]);
        expected.add_parity(&[1, -2, 3], false);
        assert_eq!(expected, formula);
    }

    #[test]
    fn xor_cannot_continue_a_clause() {
        let source = "p cnf 2 1\n1 -2\nx1 0";
        let err = get_cnf_parse_error(source);

        assert!(matches!(err, DimacsParseError::UnexpectedCharacter('x')));
    }

    #[test]
    fn negative_zero_is_an_unexpected_sequence() {
        let source = "p cnf 2 1\n1 -2 -0";
        let err = get_cnf_parse_error(source);

        assert!(matches!(err, DimacsParseError::UnexpectedCharacter('0')));
    }

    #[test]
    fn incomplete_clause_causes_error() {
        let source = "p cnf 2 1\n1 -2";
        let err = get_cnf_parse_error(source);

        assert!(matches!(err, DimacsParseError::UnterminatedClause));
    }

    #[test]
    fn clauses_before_the_header_cause_error() {
        let source = "1 -2 0\np cnf 2 1\n";
        let err = get_cnf_parse_error(source);

        assert!(matches!(err, DimacsParseError::MissingHeader));
    }

    #[test]
    fn second_header_causes_error() {
        let source = "p cnf 2 1\np cnf 2 1\n1 0\n";
        let err = get_cnf_parse_error(source);

        assert!(matches!(err, DimacsParseError::DuplicateHeader));
    }

    #[test]
    fn wcnf_header_is_invalid() {
        let source = "p wcnf 2 1 4\n4 1 0\n";
        let err = get_cnf_parse_error(source);

        assert!(matches!(err, DimacsParseError::InvalidHeader(_)));
    }

    #[test]
    fn incorrect_reported_clause_count() {
        let source = "p cnf 2 2\n1 -2 0";
        let err = get_cnf_parse_error(source);

        assert!(matches!(
            err,
            DimacsParseError::IncorrectClauseCount {
                expected: 2,
                parsed: 1
            }
        ));
    }
}
