/// Reads an integer the lenient way form and query values are usually
/// coerced: leading whitespace and an optional sign are accepted, then as many
/// digits as present. Input without leading digits yields `0`, values beyond
/// the `i64` range saturate.
pub fn parse_int_lenient(input: &str) -> i64 {
    let input = input.trim_start();
    let (negative, digits) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(digit - b'0');
        value = match value
            .checked_mul(10)
            .and_then(|value| value.checked_add(digit))
        {
            Some(value) => value,
            None => return if negative { i64::MIN } else { i64::MAX },
        };
    }

    if negative { -value } else { value }
}

/// Interprets common spellings of a boolean switch.
pub fn parse_flag(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
