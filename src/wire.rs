use crate::profile::{argument_len, Major};
use crate::CborError;

fn read_argument(data: &[u8], pos: &mut usize, ai: u8, off: usize) -> Result<u64, CborError> {
    let len = argument_len(ai)
        .ok_or_else(|| CborError::malformed(off, "reserved or indefinite additional info"))?;
    if len == 0 {
        return Ok(u64::from(ai));
    }
    let field = data
        .get(*pos..*pos + len)
        .ok_or_else(|| CborError::malformed(off, "truncated header"))?;
    *pos += len;
    Ok(field.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

/// Check that `data` holds exactly one complete, definite-length data item.
///
/// The walk keeps a single count of items still owed; every item consumes at least one byte, so
/// it terminates within `data.len()` steps.
pub fn check_single_item(data: &[u8]) -> Result<(), CborError> {
    let mut pos = 0;
    let mut owed: u64 = 1;

    while owed > 0 {
        owed -= 1;
        let off = pos;
        let ib = *data
            .get(pos)
            .ok_or_else(|| CborError::malformed(off, "missing item"))?;
        pos += 1;
        let ai = ib & 0x1f;
        let arg = read_argument(data, &mut pos, ai, off)?;

        let more = match ib >> 5 {
            m if m == Major::Bytes as u8 || m == Major::Text as u8 => {
                let end = usize::try_from(arg)
                    .ok()
                    .and_then(|len| pos.checked_add(len))
                    .filter(|&end| end <= data.len())
                    .ok_or_else(|| CborError::malformed(off, "truncated string"))?;
                pos = end;
                0
            }
            m if m == Major::Array as u8 => arg,
            m if m == Major::Map as u8 => arg
                .checked_mul(2)
                .ok_or_else(|| CborError::malformed(off, "map length overflow"))?,
            m if m == Major::Tag as u8 => 1,
            _ => 0,
        };
        owed = owed
            .checked_add(more)
            .ok_or_else(|| CborError::malformed(off, "item count overflow"))?;
    }

    if pos != data.len() {
        return Err(CborError::malformed(pos, "trailing bytes"));
    }
    Ok(())
}
