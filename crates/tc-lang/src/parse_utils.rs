use winnow::ascii::multispace0;
use winnow::combinator::{alt, cut_err};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{literal, take_while};

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// `"..."` with no escape handling; the content may not contain `"`.
pub fn quoted_string(input: &mut &str) -> ModalResult<String> {
    literal("\"").parse_next(input)?;
    let content = take_while(0.., |c: char| c != '"').parse_next(input)?;
    cut_err(literal("\""))
        .context(StrContext::Expected(StrContextValue::Description(
            "closing quote",
        )))
        .parse_next(input)?;
    Ok(content.to_string())
}

/// A run of non-whitespace characters not containing any of `stop`.
pub fn bare_token<'a>(stop: &'static [char]) -> impl FnMut(&mut &'a str) -> ModalResult<&'a str> {
    move |input: &mut &'a str| {
        take_while(1.., |c: char| !c.is_whitespace() && c != '"' && !stop.contains(&c))
            .parse_next(input)
    }
}

/// Either a quoted string or a bare token, returned owned and unquoted.
pub fn operand<'a>(stop: &'static [char]) -> impl FnMut(&mut &'a str) -> ModalResult<String> {
    move |input: &mut &'a str| {
        alt((quoted_string, bare_token(stop).map(str::to_string))).parse_next(input)
    }
}

// ---------------------------------------------------------------------------
// Whitespace
// ---------------------------------------------------------------------------

pub fn ws_skip(input: &mut &str) -> ModalResult<()> {
    let _ = multispace0.parse_next(input)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Keyword matching with word boundary
// ---------------------------------------------------------------------------

/// Match an exact keyword, ensuring it's not a prefix of a longer identifier.
pub fn kw<'a>(keyword: &'static str) -> impl FnMut(&mut &'a str) -> ModalResult<()> {
    move |input: &mut &'a str| {
        let saved = *input;
        literal(keyword).parse_next(input)?;
        if input.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_') {
            *input = saved;
            return Err(ErrMode::Backtrack(ContextError::new()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_string_strips_quotes() {
        let mut input = "\"status\" rest";
        assert_eq!(quoted_string(&mut input).unwrap(), "status");
        assert_eq!(input, " rest");
    }

    #[test]
    fn unterminated_quote_is_cut() {
        let mut input = "\"status";
        assert!(matches!(quoted_string(&mut input), Err(ErrMode::Cut(_))));
    }

    #[test]
    fn bare_token_stops_at_delimiter() {
        let mut input = "bytes>=10";
        assert_eq!(bare_token(&['<', '>', '='])(&mut input).unwrap(), "bytes");
        assert_eq!(input, ">=10");
    }

    #[test]
    fn kw_requires_boundary() {
        let mut input = "NOTE";
        assert!(kw("NOT")(&mut input).is_err());
        assert_eq!(input, "NOTE");

        let mut input = "NOT (";
        assert!(kw("NOT")(&mut input).is_ok());
        assert_eq!(input, " (");
    }
}
