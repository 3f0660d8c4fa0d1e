const CPF_LEN: usize = 11;
const CNPJ_LEN: usize = 14;
const PROCESS_NUMBER_MIN_DIGITS: usize = 15;
const PROCESS_NUMBER_MAX_DIGITS: usize = 20;

/// Keep ASCII digits only, e.g. `"529.982.247-25"` -> `"52998224725"`.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn to_digits(value: &str) -> Vec<u32> {
    value.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// CPF check digit over `digits`, weights descending from `digits.len() + 1` to 2.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    match (sum * 10) % 11 {
        10 => 0,
        r => r,
    }
}

/// CNPJ check digit; weights start at `first_weight`, step down to 2 and wrap to 9.
fn cnpj_check_digit(digits: &[u32], first_weight: u32) -> u32 {
    let mut weight = first_weight;
    let mut sum = 0;
    for d in digits {
        sum += d * weight;
        weight = if weight == 2 { 9 } else { weight - 1 };
    }
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

pub fn is_valid_cpf(value: &str) -> bool {
    let digits = to_digits(value);
    if digits.len() != CPF_LEN || all_same(&digits) {
        return false;
    }
    cpf_check_digit(&digits[..9]) == digits[9] && cpf_check_digit(&digits[..10]) == digits[10]
}

pub fn is_valid_cnpj(value: &str) -> bool {
    let digits = to_digits(value);
    if digits.len() != CNPJ_LEN || all_same(&digits) {
        return false;
    }
    cnpj_check_digit(&digits[..12], 5) == digits[12]
        && cnpj_check_digit(&digits[..13], 6) == digits[13]
}

/// Digit-count check only: 15..=20 digits after stripping formatting.
/// The CNJ structure (NNNNNNN-DD.AAAA.J.TR.OOOO) and its check digits are
/// left to the upstream provider.
pub fn is_valid_process_number(value: &str) -> bool {
    let len = to_digits(value).len();
    (PROCESS_NUMBER_MIN_DIGITS..=PROCESS_NUMBER_MAX_DIGITS).contains(&len)
}
