use rand::Rng;

use super::EntryKind;

const ID_TEMPLATE: &str = "xxxx-xxxx";

/// Produces `<kind>-dddd-dddd` with independently random digits.
///
/// Nothing checks the result against existing entries.
pub fn generate_id(kind: EntryKind) -> String {
    generate_id_with(kind, &mut rand::thread_rng())
}

pub fn generate_id_with<R: Rng + ?Sized>(kind: EntryKind, rng: &mut R) -> String {
    let mut id = format!("{kind}-");
    for ch in ID_TEMPLATE.chars() {
        if ch == 'x' {
            let digit: u8 = rng.gen_range(0..10);
            id.push(char::from(b'0' + digit));
        } else {
            id.push(ch);
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id(EntryKind::Directory);
        let suffix = id.strip_prefix("directory-").unwrap();
        assert_eq!(suffix.len(), ID_TEMPLATE.len());
        for (ch, template) in suffix.chars().zip(ID_TEMPLATE.chars()) {
            if template == 'x' {
                assert!(ch.is_ascii_digit(), "{id}");
            } else {
                assert_eq!(ch, template);
            }
        }
    }

    #[test]
    fn test_generate_id_is_seed_deterministic() {
        let first = generate_id_with(EntryKind::Text, &mut StdRng::seed_from_u64(7));
        let second = generate_id_with(EntryKind::Text, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
        assert!(first.starts_with("text-"));
    }
}
