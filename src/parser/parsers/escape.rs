use super::*;

/// Decode an escape ladder starting at a word in `0xFE00..=0xFEFF`.
///
/// Every `0xFEFE` escalates by one step as long as the next word is itself an escape word,
/// up to four steps in total. The final word's low byte is the code.
pub fn escape(input: &[u8]) -> TadResult<Escape> {
    let (mut rest, mut word) = context("escape first step", le_u16)(input)?;
    let mut steps: u8 = 1;
    while word == ESCAPE_STEP && steps < MAX_ESCAPE_STEPS {
        let (next_rest, next) = match le_u16::<_, TadParserError<&[u8]>>(rest) {
            Ok(v) => v,
            Err(_) => return Err(truncated(input, (steps as u64 + 1) * 2, input.len())),
        };
        if next >> 8 != 0xFE {
            break;
        }
        rest = next_rest;
        word = next;
        steps += 1;
    }
    return Ok((
        rest,
        Escape {
            steps,
            code: (word & 0xFF) as u8,
        },
    ));
}
