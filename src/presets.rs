use crate::spec::{MaskElement, MaskSpec};

pub const PHONE_US: &str = "(###) ###-####";
pub const ZIP_US: &str = "#####";
pub const DATE_DD_MM_YYYY: &str = "##/##/####";
pub const TIME_HH_MM: &str = "##:##";

/// `HH:MM-HH:MM` mask for the value typed so far.
///
/// The hour's second digit only allows `0-3` when its first digit is `2`, so the
/// mask has to be rebuilt from the current value on every change.
pub fn time_range(value: &str) -> MaskSpec {
    let digits: Vec<char> = value.chars().filter(char::is_ascii_digit).collect();
    let mut elements = Vec::<MaskElement>::with_capacity(11);
    push_time(&mut elements, digits.first().copied());
    elements.push(MaskElement::literal("-"));
    push_time(&mut elements, digits.get(4).copied());
    MaskSpec::Elements(elements)
}

fn push_time(elements: &mut Vec<MaskElement>, hour_tens: Option<char>) {
    let hour_units = if hour_tens == Some('2') { "[0-3]" } else { "[0-9]" };
    elements.push(MaskElement::pattern("[0-2]"));
    elements.push(MaskElement::pattern(hour_units));
    elements.push(MaskElement::literal(":"));
    elements.push(MaskElement::pattern("[0-5]"));
    elements.push(MaskElement::pattern("[0-9]"));
}

#[cfg(test)]
mod tests {
    use super::time_range;
    use crate::masker::Masker;
    use rstest::rstest;

    #[rstest]
    #[case("02532137", "02:53-21:37")]
    #[case("23599999", "23:59-")]
    #[case("2400", "2")]
    #[case("1959", "19:59-")]
    #[case("0000", "00:00-")]
    #[case("12002401", "12:00-2")]
    #[case("", "")]
    fn time_range_restricts_each_position(#[case] raw: &str, #[case] expected: &str) {
        let masker = Masker::default();
        assert_eq!(masker.format(raw, &time_range(raw)), expected);
    }

    #[test]
    fn time_range_mask_depends_on_typed_hours() {
        assert_ne!(time_range("2"), time_range("1"));
        assert_eq!(time_range("1"), time_range("0"));
        assert_eq!(time_range("23:59-2"), time_range("23592"));
    }
}
