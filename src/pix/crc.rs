//! CRC16/CCITT-FALSE checksum used by the BR Code `63` record

const INITIAL: u16 = 0xFFFF;
const POLYNOMIAL: u16 = 0x1021;

/// Compute the CRC16/CCITT-FALSE of a byte slice
///
/// Initial register `0xFFFF`, polynomial `0x1021`, MSB first, no reflection
/// and no final xor.
pub fn crc16_ccitt(bytes: &[u8]) -> u16 {
    let mut crc = INITIAL;
    for &byte in bytes {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Checksum of the UTF-8 bytes of `input` as 4 uppercase hex digits
pub fn crc16_hex(input: &str) -> String {
    format!("{:04X}", crc16_ccitt(input.as_bytes()))
}
