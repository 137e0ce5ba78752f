use super::*;

/// Segment lengths are a single word, unless that word is `0xFFFF`,
/// in which case the real length follows as a 32-bit value.
pub fn segment_length(input: &[u8]) -> TadResult<u32> {
    let (rest, short) = match le_u16::<_, TadParserError<&[u8]>>(input) {
        Ok(v) => v,
        Err(_) => return Err(truncated(input, 2, input.len())),
    };
    if short != LONG_LENGTH {
        return Ok((rest, short as u32));
    }
    let (rest, long) = match le_u32::<_, TadParserError<&[u8]>>(rest) {
        Ok(v) => v,
        Err(_) => return Err(truncated(input, 6, input.len())),
    };
    return Ok((rest, long));
}

