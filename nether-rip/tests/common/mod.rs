//! Synthetic module images shared by the integration tests.

#![allow(dead_code)]

/// Write `s` into a NUL-padded field of `len` bytes
pub fn write_fixed_str(out: &mut Vec<u8>, s: &str, len: usize) {
    let mut buf = vec![0u8; len];
    let bytes = s.as_bytes();
    let copy_len = bytes.len().min(len);
    buf[..copy_len].copy_from_slice(&bytes[..copy_len]);
    out.extend_from_slice(&buf);
}

/// A four-channel `M.K.` module with one sample per entry in `samples`
///
/// Sample payloads must be an even number of bytes.
pub fn build_mod(title: &str, samples: &[(&str, &[u8])], order: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    write_fixed_str(&mut out, title, 20);

    for i in 0..31 {
        match samples.get(i) {
            Some((name, data)) => {
                assert_eq!(data.len() % 2, 0, "MOD samples are whole words");
                write_fixed_str(&mut out, name, 22);
                out.extend_from_slice(&((data.len() / 2) as u16).to_be_bytes());
                out.push(0); // finetune
                out.push(64); // volume
                out.extend_from_slice(&0u16.to_be_bytes());
                out.extend_from_slice(&1u16.to_be_bytes());
            }
            None => out.extend_from_slice(&[0u8; 30]),
        }
    }

    out.push(order.len() as u8);
    out.push(127);
    let mut table = [0u8; 128];
    table[..order.len()].copy_from_slice(order);
    out.extend_from_slice(&table);
    out.extend_from_slice(b"M.K.");

    let patterns = order.iter().copied().max().unwrap_or(0) as usize + 1;
    out.resize(out.len() + patterns * 1024, 0xEE);

    for (_, data) in samples {
        out.extend_from_slice(data);
    }
    out
}

/// A one-pattern XM with one single-sample 8-bit instrument per entry in
/// `instruments`; payloads are given as plain PCM and delta-encoded here.
pub fn build_xm(title: &str, instruments: &[(&str, &[i8])]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"Extended Module: ");
    write_fixed_str(&mut out, title, 20);
    out.push(0x1A);
    write_fixed_str(&mut out, "FastTracker v2.00", 20);
    out.extend_from_slice(&0x0104u16.to_le_bytes());
    out.extend_from_slice(&276u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // song length
    out.extend_from_slice(&0u16.to_le_bytes()); // restart
    out.extend_from_slice(&2u16.to_le_bytes()); // channels
    out.extend_from_slice(&1u16.to_le_bytes()); // patterns
    out.extend_from_slice(&(instruments.len() as u16).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // flags
    out.extend_from_slice(&6u16.to_le_bytes()); // speed
    out.extend_from_slice(&125u16.to_le_bytes()); // BPM
    out.extend_from_slice(&[0u8; 256]);

    // One empty 64-row pattern: every cell packed as 0x80
    out.extend_from_slice(&9u32.to_le_bytes());
    out.push(0);
    out.extend_from_slice(&64u16.to_le_bytes());
    out.extend_from_slice(&128u16.to_le_bytes());
    out.extend_from_slice(&[0x80; 128]);

    for (name, pcm) in instruments {
        out.extend_from_slice(&243u32.to_le_bytes());
        write_fixed_str(&mut out, name, 22);
        out.push(0);
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&[0u8; 210]);

        out.extend_from_slice(&(pcm.len() as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.push(64); // volume
        out.push(0); // finetune
        out.push(0); // 8-bit, no loop
        out.push(128); // panning
        out.push(0); // relative note
        out.push(0); // reserved
        write_fixed_str(&mut out, name, 22);

        let mut old = 0i8;
        for &v in pcm.iter() {
            out.push(v.wrapping_sub(old) as u8);
            old = v;
        }
    }
    out
}

/// Pull the payload of the `data` chunk back out of a WAV image
pub fn data_chunk(wav: &[u8]) -> Option<&[u8]> {
    if wav.len() < 12 || &wav[0..4] != b"RIFF" || &wav[8..12] != b"WAVE" {
        return None;
    }
    let mut pos = 12;
    while pos + 8 <= wav.len() {
        let id = &wav[pos..pos + 4];
        let len = u32::from_le_bytes(wav[pos + 4..pos + 8].try_into().ok()?) as usize;
        let body = pos + 8;
        if id == b"data" {
            return wav.get(body..body + len);
        }
        pos = body + len;
    }
    None
}
