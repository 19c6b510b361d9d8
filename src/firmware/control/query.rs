use crate::firmware::types::GainUpdate;

const GAIN_1_KEY: &str = "gain_1=";
const GAIN_2_KEY: &str = "gain_2=";
const GAIN_3_KEY: &str = "gain_3=";

/// Pulls the three EQ gains out of a request target.
///
/// Keys are searched anywhere in the target and run to the next `&`. A key
/// with an empty value counts as absent. `None` when no gain was given.
pub fn parse_gain_query(target: &str) -> Option<GainUpdate> {
    let mut update = GainUpdate::default();
    let mut found = false;

    for (key, slot) in [
        (GAIN_1_KEY, &mut update.gain_1),
        (GAIN_2_KEY, &mut update.gain_2),
        (GAIN_3_KEY, &mut update.gain_3),
    ] {
        match find_key_value(target, key) {
            Some(raw) => {
                *slot = parse_float_prefix(raw);
                found = true;
            }
            None => log::debug!("ui_http: key '{}' not found", key),
        }
    }

    found.then_some(update)
}

fn find_key_value<'a>(target: &'a str, key: &str) -> Option<&'a str> {
    let start = target.find(key)? + key.len();
    let tail = &target[start..];
    let value = tail.split('&').next().unwrap_or(tail);
    (!value.is_empty()).then_some(value)
}

/// Leading decimal number of `raw`, 0.0 when there is none.
fn parse_float_prefix(raw: &str) -> f32 {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0usize;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0usize;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    trimmed[..end].parse().unwrap_or(0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
