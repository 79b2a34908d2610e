use rand::Rng;

/// Room code alphabet. I and O are left out so codes read unambiguously.
pub const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

pub const ROOM_CODE_LEN: usize = 4;

/// Generate a random room code such as `KQTW`.
pub fn generate_room_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ROOM_CODE_LEN)
        .map(|_| ROOM_CODE_ALPHABET[rng.random_range(0..ROOM_CODE_ALPHABET.len())] as char)
        .collect()
}

/// Uppercase and trim a code typed by a player.
pub fn normalize_room_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

pub fn is_valid_room_code(code: &str) -> bool {
    code.len() == ROOM_CODE_LEN && code.bytes().all(|b| ROOM_CODE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn generated_codes_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let code = generate_room_code(&mut rng);
            assert!(is_valid_room_code(&code), "bad code {code}");
            assert!(!code.contains('I') && !code.contains('O'));
        }
    }

    #[test]
    fn validation_rejects_ambiguous_and_wrong_length() {
        assert!(is_valid_room_code("ABCD"));
        assert!(!is_valid_room_code("ABC"));
        assert!(!is_valid_room_code("ABCO"));
        assert!(!is_valid_room_code("abcd"));
        assert!(is_valid_room_code(&normalize_room_code(" abcd ")));
    }
}
