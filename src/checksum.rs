//! Functions for computing the Internet checksum.

/// Compute the Internet checksum (RFC 1071) of `data`.
///
/// The data is summed as 16-bit words in network byte order and the result
/// should be stored in network byte order.
/// A trailing odd byte is not part of the sum, it is not zero-padded.
pub fn internet_checksum(data: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    for word in data.chunks_exact(2) {
        sum += u16::from_be_bytes([word[0], word[1]]) as u32;
        if sum & 0x8000_0000 != 0 {
            sum = (sum & 0xFFFF) + (sum >> 16);
        }
    }
    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    !(sum as u16)
}
