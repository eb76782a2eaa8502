//! Byte-string comparisons over slices.
//!
//! A C string here is a byte slice whose first zero byte, or its end if it has
//! none, marks the terminator. Results are differences of the first unequal
//! bytes read as signed `char`s.

#[inline(always)]
fn diff(l: u8, r: u8) -> i32 {
    i32::from(l as i8) - i32::from(r as i8)
}

// Past the end of the slice reads as the terminator.
#[inline(always)]
fn at(s: &[u8], i: usize) -> u8 {
    s.get(i).copied().unwrap_or(0)
}

/// Compares the first `n` bytes of `lhs` and `rhs`. Zero bytes are compared
/// like any other byte.
///
/// # Panics
///
/// Panics if `n` exceeds the length of either slice.
pub fn memcmp(lhs: &[u8], rhs: &[u8], n: usize) -> i32 {
    lhs[..n]
        .iter()
        .zip(&rhs[..n])
        .find(|(l, r)| l != r)
        .map_or(0, |(&l, &r)| diff(l, r))
}

pub fn strcmp(lhs: &[u8], rhs: &[u8]) -> i32 {
    let mut i = 0;
    loop {
        let l = at(lhs, i);
        let r = at(rhs, i);
        if l != r {
            return diff(l, r);
        }
        if l == 0 {
            return 0;
        }
        i += 1;
    }
}

/// Like [`strcmp`], looking at no more than `n` bytes.
pub fn strncmp(lhs: &[u8], rhs: &[u8], n: usize) -> i32 {
    for i in 0..n {
        let l = at(lhs, i);
        let r = at(rhs, i);
        if l != r {
            return diff(l, r);
        }
        if l == 0 {
            break;
        }
    }
    0
}

pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memcmp() {
        let a = b"abc\0xyz";
        assert_eq!(memcmp(a, a, a.len()), 0);
        assert_eq!(memcmp(b"abc", b"abd", 3), -1);
        assert_eq!(memcmp(b"abd", b"abc", 3), 1);
        assert_eq!(memcmp(b"abc", b"abd", 2), 0);
        assert_eq!(memcmp(b"", b"", 0), 0);
    }

    #[test]
    fn test_memcmp_does_not_stop_at_zero() {
        assert_eq!(memcmp(b"a\0b", b"a\0c", 3), -1);
    }

    #[test]
    fn test_memcmp_antisymmetric() {
        let pairs: &[(&[u8], &[u8])] = &[
            (b"hello", b"help!"),
            (b"\x01\x80", b"\x01\x7f"),
            (b"zzz", b"aaa"),
            (b"same", b"same"),
        ];
        for (a, b) in pairs {
            let n = a.len().min(b.len());
            assert_eq!(memcmp(a, b, n).signum(), -memcmp(b, a, n).signum());
        }
    }

    #[test]
    fn test_memcmp_bytes_are_signed() {
        assert_eq!(memcmp(b"\xff", b"\x01", 1), -2);
        assert_eq!(memcmp(&[0x80], &[0x01], 1), -129);
        assert_eq!(memcmp(&[0x01], &[0x80], 1), 129);
    }

    #[test]
    #[should_panic]
    fn test_memcmp_out_of_range() {
        memcmp(b"ab", b"abc", 3);
    }

    #[test]
    fn test_strcmp() {
        assert_eq!(strcmp(b"abc\0", b"abc\0"), 0);
        assert_eq!(strcmp(b"abc", b"abc\0junk"), 0);
        assert_eq!(strcmp(b"abc", b"abd"), -1);
        assert_eq!(strcmp(b"b", b"a"), 1);
        assert_eq!(strcmp(b"ab", b"abc"), -i32::from(b'c'));
        assert_eq!(strcmp(b"", b""), 0);
    }

    #[test]
    fn test_strcmp_sign_follows_first_difference() {
        let a = b"kernel";
        let b = b"kernal";
        assert!(strcmp(a, b) > 0);
        assert!(strcmp(b, a) < 0);
        assert_eq!(strcmp(a, b), i32::from(b'e') - i32::from(b'a'));
    }

    #[test]
    fn test_strcmp_bytes_are_signed() {
        assert_eq!(strcmp(&[0xc3, 0], &[0x41, 0]), -126);
        assert_eq!(strcmp(&[0x41, 0], &[0xc3, 0]), 126);
        assert!(strcmp("é".as_bytes(), b"e") < 0);
        assert!(strncmp(&[0x90], &[0x10], 1) < 0);
    }

    #[test]
    fn test_strncmp() {
        assert_eq!(strncmp(b"abcdef", b"abcxyz", 3), 0);
        assert!(strncmp(b"abcdef", b"abcxyz", 4) < 0);
        assert_eq!(strncmp(b"ab\0x", b"ab\0y", 4), 0);
        assert_eq!(strncmp(b"a", b"b", 0), 0);
    }

    #[test]
    fn test_strlen() {
        assert_eq!(strlen(b"hello\0world"), 5);
        assert_eq!(strlen(b"hello"), 5);
        assert_eq!(strlen(b"\0"), 0);
    }
}
