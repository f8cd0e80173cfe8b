// src/seed/abi.rs

//! Minimal Solidity ABI encoding for the one call this tool makes:
//! `mintAgent(address owner, string name, string[] capabilities)`.
//!
//! Head/tail encoding per the Solidity ABI: the head holds the address word
//! and byte offsets of the two dynamic arguments, the tails follow in order.
//! All words are 32 bytes, big-endian, zero-padded.

use anyhow::{Result, anyhow};
use sha3::{Digest, Keccak256};

/// Signature of the external contract method the seeder calls.
pub const MINT_AGENT_SIGNATURE: &str = "mintAgent(address,string,string[])";

/// First four bytes of the keccak-256 of the canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Encode the full `mintAgent` calldata as a `0x`-prefixed hex string.
pub fn encode_mint_call(owner: &str, name: &str, capabilities: &[String]) -> Result<String> {
    let addr = parse_address(owner)?;
    let name_tail = encode_string(name);
    let caps_tail = encode_string_array(capabilities);

    let mut data = Vec::with_capacity(4 + 96 + name_tail.len() + caps_tail.len());
    data.extend_from_slice(&selector(MINT_AGENT_SIGNATURE));

    // Head: address, offset of `name`, offset of `capabilities`.
    // Offsets are relative to the start of the argument block (3 words).
    let mut addr_word = [0u8; 32];
    addr_word[12..].copy_from_slice(&addr);
    data.extend_from_slice(&addr_word);
    data.extend_from_slice(&usize_word(96));
    data.extend_from_slice(&usize_word(96 + name_tail.len()));

    data.extend_from_slice(&name_tail);
    data.extend_from_slice(&caps_tail);

    Ok(format!("0x{}", to_hex(&data)))
}

/// `string`: length word followed by the UTF-8 bytes padded to a word.
fn encode_string(s: &str) -> Vec<u8> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(32 + bytes.len().next_multiple_of(32));
    out.extend_from_slice(&usize_word(bytes.len()));
    out.extend_from_slice(bytes);
    while out.len() % 32 != 0 {
        out.push(0);
    }
    out
}

/// `string[]`: length word, then per-element offsets (relative to the start
/// of the element area), then the element tails.
fn encode_string_array(items: &[String]) -> Vec<u8> {
    let tails: Vec<Vec<u8>> = items.iter().map(|s| encode_string(s)).collect();

    let mut out = Vec::new();
    out.extend_from_slice(&usize_word(items.len()));

    let mut offset = items.len() * 32;
    for tail in &tails {
        out.extend_from_slice(&usize_word(offset));
        offset += tail.len();
    }
    for tail in &tails {
        out.extend_from_slice(tail);
    }
    out
}

fn usize_word(n: usize) -> [u8; 32] {
    let mut w = [0u8; 32];
    w[24..].copy_from_slice(&(n as u64).to_be_bytes());
    w
}

fn parse_address(addr: &str) -> Result<[u8; 20]> {
    let hex = addr
        .strip_prefix("0x")
        .ok_or_else(|| anyhow!("address '{}' must start with 0x", addr))?;
    if hex.len() != 40 || !hex.is_ascii() {
        return Err(anyhow!(
            "address '{}' must have 40 hex chars after 0x",
            addr
        ));
    }

    let mut out = [0u8; 20];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16)
            .map_err(|_| anyhow!("address '{}' contains non-hex characters", addr))?;
    }
    Ok(out)
}

fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes.iter().fold(
        String::with_capacity(bytes.len() * 2),
        |mut acc, b| {
            let _ = write!(acc, "{b:02x}");
            acc
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_at(data: &[u8], idx: usize) -> &[u8] {
        &data[idx * 32..(idx + 1) * 32]
    }

    fn as_usize(word: &[u8]) -> usize {
        let mut n = 0usize;
        for &b in word {
            n = (n << 8) | b as usize;
        }
        n
    }

    #[test]
    fn selector_matches_known_vector() {
        // The classic ERC-20 transfer selector.
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn encode_string_pads_to_word() {
        let enc = encode_string("abc");
        assert_eq!(enc.len(), 64);
        assert_eq!(as_usize(word_at(&enc, 0)), 3);
        assert_eq!(&enc[32..35], b"abc");
        assert!(enc[35..].iter().all(|&b| b == 0));
    }

    #[test]
    fn encode_empty_string_is_single_word() {
        let enc = encode_string("");
        assert_eq!(enc.len(), 32);
        assert_eq!(as_usize(word_at(&enc, 0)), 0);
    }

    #[test]
    fn encode_string_array_offsets_are_relative_to_element_area() {
        let items = vec!["x".to_string(), "yz".to_string()];
        let enc = encode_string_array(&items);

        assert_eq!(as_usize(word_at(&enc, 0)), 2); // array length
        assert_eq!(as_usize(word_at(&enc, 1)), 64); // first element offset
        assert_eq!(as_usize(word_at(&enc, 2)), 128); // second element offset

        // First element tail starts right after the offsets.
        assert_eq!(as_usize(word_at(&enc, 3)), 1); // len("x")
        assert_eq!(enc[4 * 32], b'x');
    }

    #[test]
    fn mint_call_head_layout() {
        let owner = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
        let caps = vec!["a".to_string()];
        let hex = encode_mint_call(owner, "ab", &caps).unwrap();

        let hex = hex.strip_prefix("0x").unwrap();
        let bytes: Vec<u8> = (0..hex.len() / 2)
            .map(|i| u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).unwrap())
            .collect();

        assert_eq!(&bytes[..4], &selector(MINT_AGENT_SIGNATURE));

        let args = &bytes[4..];
        // Address word: 12 zero bytes then the 20 address bytes.
        assert!(args[..12].iter().all(|&b| b == 0));
        assert_eq!(args[12], 0xf3);
        assert_eq!(args[31], 0x66);

        // Offsets: name right after the 3-word head, capabilities after the
        // name tail (len word + one padded word for "ab").
        assert_eq!(as_usize(word_at(args, 1)), 96);
        assert_eq!(as_usize(word_at(args, 2)), 160);

        // Name tail.
        assert_eq!(as_usize(word_at(args, 3)), 2);
        assert_eq!(&args[4 * 32..4 * 32 + 2], b"ab");

        // Capabilities tail: length 1, offset 32, then "a".
        assert_eq!(as_usize(word_at(args, 5)), 1);
        assert_eq!(as_usize(word_at(args, 6)), 32);
        assert_eq!(as_usize(word_at(args, 7)), 1);
        assert_eq!(args[8 * 32], b'a');

        // Nothing dangles after the last tail.
        assert_eq!(bytes.len(), 4 + 9 * 32);
    }

    #[test]
    fn rejects_malformed_owner_address() {
        assert!(encode_mint_call("f39F", "a", &[]).is_err());
        assert!(encode_mint_call("0x1234", "a", &[]).is_err());
    }
}
