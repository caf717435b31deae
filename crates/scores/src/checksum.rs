//! Tamper checksums stored next to every score.
//!
//! The arithmetic mixes 32-bit wrapping products with 64-bit accumulation so
//! that files written by earlier releases of the game still verify.

/// First score checksum.
pub fn code_a(score: i32) -> i64 {
    let mut code = score.wrapping_mul(score) as i64;
    code -= score.wrapping_mul(2) as i64;
    code += 4937;
    code /= 2;
    code += 23391;
    code
}

/// Second score checksum.
pub fn code_b(score: i32) -> i64 {
    let s = score.wrapping_add(3);
    let mut code = s.wrapping_mul(s).wrapping_mul(s) as i64;
    code -= 55393;
    code *= 3;
    code -= 2323;
    code /= 2;
    code -= score as i64;
    code
}

/// Name hash over UTF-16 code units. Written to disk but not verified on load.
pub fn name_code(units: &[u16]) -> i64 {
    let mut code: i64 = 298_483_231;
    for (i, &unit) in units.iter().enumerate() {
        let c = unit as i32;
        code += c.wrapping_mul(c).wrapping_mul(c).wrapping_sub(c) as i64;
        if i > 0 {
            code -= ((units[i - 1] as i32 % 23) * 2) as i64;
        }
    }
    code
}

/// True when both stored checksums match the score.
pub fn verify(score: i32, a: i64, b: i64) -> bool {
    code_a(score) == a && code_b(score) == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_a_small_values() {
        // 0: (0 - 0 + 4937) / 2 + 23391
        assert_eq!(code_a(0), 2468 + 23391);
        // 10: (100 - 20 + 4937) / 2 + 23391
        assert_eq!(code_a(10), 5017 / 2 + 23391);
    }

    #[test]
    fn test_code_b_small_values() {
        // 0: ((27 - 55393) * 3 - 2323) / 2 - 0
        assert_eq!(code_b(0), ((27 - 55393) * 3 - 2323) / 2);
        assert_eq!(code_b(1), ((64 - 55393) * 3 - 2323) / 2 - 1);
    }

    #[test]
    fn test_large_scores_wrap_like_32_bit() {
        let s = 210_000i32;
        let wrapped = s.wrapping_mul(s) as i64;
        assert_ne!(wrapped, (s as i64) * (s as i64));
        assert_eq!(code_a(s), ((wrapped - 420_000 + 4937) / 2) + 23391);
    }

    #[test]
    fn test_verify_rejects_flipped_checksum() {
        let s = 48_211;
        assert!(verify(s, code_a(s), code_b(s)));
        assert!(!verify(s, code_a(s) ^ 1, code_b(s)));
        assert!(!verify(s, code_a(s), code_b(s) ^ 0x100));
    }

    #[test]
    fn test_name_code_depends_on_order() {
        let ab: Vec<u16> = "ab".encode_utf16().collect();
        let ba: Vec<u16> = "ba".encode_utf16().collect();
        assert_ne!(name_code(&ab), name_code(&ba));
        assert_eq!(name_code(&[]), 298_483_231);
    }
}
