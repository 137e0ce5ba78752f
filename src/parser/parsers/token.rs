use super::*;

/// Parse one segment: ID word, length, body.
///
/// Fails with `TruncatedSegment` rather than reading past the end of the buffer.
pub fn segment(input: &[u8]) -> TadResult<Segment> {
    let (rest, id) = context("segment id", le_u16)(input)?;
    let (rest, length) = segment_length(rest)?;
    let declared = to_usize_or_err!(length as u64);
    if rest.len() < declared {
        return Err(truncated(input, length as u64, rest.len()));
    }
    let (rest, body) = context("segment body", take(declared))(rest)?;
    return Ok((rest, Segment { id, length, body }));
}

/// Parse whatever unit starts at the cursor.
pub fn token(input: &[u8]) -> TadResult<Token> {
    if input.len() < 2 {
        return Ok((&input[input.len()..], Token::End));
    }
    let (rest, word) = context("token word", le_u16)(input)?;
    if word == TNULL {
        return Ok((rest, Token::End));
    }
    if word < TAG_THRESHOLD {
        return Ok((rest, Token::Char(word)));
    }
    if word >> 8 == 0xFE {
        let (rest, esc) = escape(input)?;
        return Ok((rest, Token::Escape(esc)));
    }
    if word >= SEGMENT_BASE {
        let (rest, seg) = segment(input)?;
        return Ok((rest, Token::Segment(seg)));
    }
    return Ok((rest, Token::Char(word)));
}

/// Walks a buffer token by token, remembering where each token started.
///
/// The iterator stops after the first `End` token or the first error.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    base: &'a [u8],
    rest: &'a [u8],
    done: bool,
}

impl<'a> Tokens<'a> {
    pub fn new(base: &'a [u8]) -> Tokens<'a> {
        return Tokens {
            base,
            rest: base,
            done: false,
        };
    }

    /// Byte offset of the cursor from the start of the buffer.
    pub fn offset(&self) -> usize {
        return self.base.len() - self.rest.len();
    }

    /// The bytes not consumed yet.
    pub fn remaining(&self) -> &'a [u8] {
        return self.rest;
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<(usize, Token<'a>), TadParserError<&'a [u8]>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let offset = self.offset();
        match finish(self.rest, token(self.rest)) {
            Ok((rest, tok)) => {
                self.rest = rest;
                if tok == Token::End {
                    self.done = true;
                }
                return Some(Ok((offset, tok)));
            }
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}
