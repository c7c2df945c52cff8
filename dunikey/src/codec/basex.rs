//! Generic base-X encoder/decoder.
//!
//! Treats a byte sequence as one big-endian unsigned integer and rewrites it
//! in base B, where B is the alphabet size. The arithmetic is the schoolbook
//! kind: a little-endian digit array, multiplied and carried one input symbol
//! at a time. That is O(n·m) and perfectly fine for 32- and 64-byte keys;
//! do not point it at a video file.
//!
//! Leading zero bytes carry no numeric value, so they are handled out of
//! band: each one becomes one copy of the alphabet's first character (the
//! "leader"), and each leading leader decodes back to one zero byte.

use std::fmt;

use crate::error::{DunikeyError, Result};

/// Marker for "not in the alphabet" in the lookup table.
const INVALID: u8 = 0xFF;

/// Largest supported alphabet. Alphabets are ASCII, so 128 is the ceiling.
const MAX_BASE: usize = 128;

/// Why an alphabet was rejected. `Copy` so the `const` constructor can match
/// on it without dropping anything.
#[derive(Debug, Clone, Copy)]
enum AlphabetFault {
    TooShort,
    TooLong,
    NonAscii,
    Duplicate(u8),
}

impl AlphabetFault {
    fn into_error(self) -> DunikeyError {
        let reason = match self {
            AlphabetFault::TooShort => "needs at least 2 characters".to_string(),
            AlphabetFault::TooLong => format!("more than {MAX_BASE} characters"),
            AlphabetFault::NonAscii => "only ASCII characters are supported".to_string(),
            AlphabetFault::Duplicate(c) => format!("{:?} is ambiguous", c as char),
        };
        DunikeyError::InvalidAlphabet(reason)
    }
}

/// A base-X codec bound to one alphabet.
///
/// The digit → character table and the character → digit lookup are both
/// built once, at construction, and never change afterwards. There is no
/// global state: two codecs with different alphabets share nothing.
///
/// # Examples
///
/// ```
/// use dunikey::codec::BaseX;
///
/// let b58 = BaseX::new("123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz").unwrap();
/// assert_eq!(b58.encode(b"Hello World!"), "2NEpo7TZRRrLZSi2U");
/// assert_eq!(b58.decode("2NEpo7TZRRrLZSi2U").unwrap(), b"Hello World!");
/// ```
#[derive(Clone)]
pub struct BaseX {
    /// Digit value → ASCII character. Only the first `base` entries are used.
    alphabet: [u8; MAX_BASE],
    /// ASCII character → digit value, or `INVALID`.
    lookup: [u8; MAX_BASE],
    base: usize,
}

impl BaseX {
    /// Build a codec from a runtime alphabet.
    ///
    /// Fails with [`DunikeyError::InvalidAlphabet`] if a character repeats,
    /// the alphabet is shorter than 2 or longer than 128 characters, or it
    /// contains non-ASCII characters.
    pub fn new(alphabet: &str) -> Result<Self> {
        Self::build(alphabet.as_bytes()).map_err(AlphabetFault::into_error)
    }

    /// Build a codec at compile time. A bad alphabet is a compile error when
    /// used in a `const` or `static` initializer, and a panic otherwise.
    pub const fn from_static(alphabet: &'static str) -> Self {
        match Self::build(alphabet.as_bytes()) {
            Ok(codec) => codec,
            Err(_) => panic!("invalid base-X alphabet"),
        }
    }

    const fn build(bytes: &[u8]) -> std::result::Result<Self, AlphabetFault> {
        let len = bytes.len();
        if len < 2 {
            return Err(AlphabetFault::TooShort);
        }
        if len > MAX_BASE {
            return Err(AlphabetFault::TooLong);
        }

        let mut alphabet = [0u8; MAX_BASE];
        let mut lookup = [INVALID; MAX_BASE];
        let mut i = 0;
        while i < len {
            let c = bytes[i];
            if c as usize >= MAX_BASE {
                return Err(AlphabetFault::NonAscii);
            }
            if lookup[c as usize] != INVALID {
                return Err(AlphabetFault::Duplicate(c));
            }
            lookup[c as usize] = i as u8;
            alphabet[i] = c;
            i += 1;
        }

        Ok(Self {
            alphabet,
            lookup,
            base: len,
        })
    }

    /// Alphabet size.
    pub fn base(&self) -> usize {
        self.base
    }

    /// The character that stands for a leading zero byte.
    pub fn leader(&self) -> char {
        self.alphabet[0] as char
    }

    /// The alphabet, in digit order.
    pub fn alphabet(&self) -> String {
        self.alphabet[..self.base].iter().map(|&c| c as char).collect()
    }

    /// Digit value of `ch`, if it belongs to the alphabet.
    pub fn digit_value(&self, ch: char) -> Option<u8> {
        if !ch.is_ascii() {
            return None;
        }
        match self.lookup[ch as usize] {
            INVALID => None,
            value => Some(value),
        }
    }

    /// Encode bytes as a string over this alphabet.
    ///
    /// Empty input encodes to the empty string. `k` leading zero bytes give
    /// exactly `k` leading leader characters, followed by the positional
    /// encoding of the rest.
    pub fn encode(&self, source: &[u8]) -> String {
        if source.is_empty() {
            return String::new();
        }

        let zeros = source.iter().take_while(|&&b| b == 0).count();
        let base = self.base as u32;

        // Little-endian base-B digits of the value seen so far.
        let mut digits: Vec<u8> = Vec::with_capacity(source.len() * 2);
        for &byte in &source[zeros..] {
            let mut carry = u32::from(byte);
            for digit in digits.iter_mut() {
                carry += u32::from(*digit) << 8;
                *digit = (carry % base) as u8;
                carry /= base;
            }
            while carry > 0 {
                digits.push((carry % base) as u8);
                carry /= base;
            }
        }

        let mut out = String::with_capacity(zeros + digits.len());
        out.extend(std::iter::repeat(self.leader()).take(zeros));
        out.extend(digits.iter().rev().map(|&d| self.alphabet[d as usize] as char));
        out
    }

    /// Decode a string over this alphabet.
    ///
    /// Fails with [`DunikeyError::InvalidCharacter`] on the first character
    /// that is not in the alphabet.
    pub fn decode(&self, input: &str) -> Result<Vec<u8>> {
        self.decode_inner(input)
            .map_err(|(position, character)| DunikeyError::InvalidCharacter {
                character,
                position,
                base: self.base,
            })
    }

    /// Decode without raising an error: `None` if any character is outside
    /// the alphabet. Handy for probing several alphabets in turn.
    pub fn decode_unsafe(&self, input: &str) -> Option<Vec<u8>> {
        self.decode_inner(input).ok()
    }

    /// True if every character of `input` belongs to the alphabet.
    pub fn is_valid(&self, input: &str) -> bool {
        input.chars().all(|c| self.digit_value(c).is_some())
    }

    /// Shared decode loop. The error carries the position and character of
    /// the first invalid input.
    fn decode_inner(&self, input: &str) -> std::result::Result<Vec<u8>, (usize, char)> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let base = self.base as u32;
        let mut zeros = 0usize;
        let mut leading = true;

        // Little-endian bytes of the value seen so far.
        let mut bytes: Vec<u8> = Vec::with_capacity(input.len());
        for (position, ch) in input.chars().enumerate() {
            let value = self.digit_value(ch).ok_or((position, ch))?;
            if leading && value == 0 {
                zeros += 1;
                continue;
            }
            leading = false;

            let mut carry = u32::from(value);
            for byte in bytes.iter_mut() {
                carry += u32::from(*byte) * base;
                *byte = (carry & 0xff) as u8;
                carry >>= 8;
            }
            while carry > 0 {
                bytes.push((carry & 0xff) as u8);
                carry >>= 8;
            }
        }

        let mut out = vec![0u8; zeros];
        out.extend(bytes.iter().rev());
        Ok(out)
    }
}

impl fmt::Debug for BaseX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BaseX(base{})", self.base)
    }
}
