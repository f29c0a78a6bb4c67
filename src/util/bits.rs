/// Big-endian bit array used to split entropy into mnemonic word groups
#[derive(Debug, Default, Clone)]
pub struct Bits {
    pub data: Vec<u8>,
    pub len: usize,
}

impl Bits {
    /// Creates a bits array with room for a certain number of bits
    pub fn with_capacity(capacity: usize) -> Bits {
        Bits {
            data: Vec::with_capacity((capacity + 7) / 8),
            len: 0,
        }
    }

    /// Creates the bits from the first `len` bits of a slice
    pub fn from_slice(data: &[u8], len: usize) -> Bits {
        let len = len.min(data.len() * 8);
        let mut bits = Bits::with_capacity(len);
        for i in 0..len {
            bits.push_bit((data[i / 8] >> (7 - i % 8)) & 1 == 1);
        }
        bits
    }

    /// Appends the low `len` bits of `value`, most significant first
    pub fn push(&mut self, value: u32, len: usize) {
        for i in (0..len).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
    }

    /// Appends another bit array
    pub fn append(&mut self, other: &Bits) {
        for i in 0..other.len {
            self.push_bit(other.bit(i));
        }
    }

    fn push_bit(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.data.push(0);
        }
        if bit {
            let last = self.data.len() - 1;
            self.data[last] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    fn bit(&self, i: usize) -> bool {
        (self.data[i / 8] >> (7 - i % 8)) & 1 == 1
    }

    /// Gets a range out of the bit array, right-aligned
    pub fn extract(&self, i: usize, len: usize) -> u32 {
        (i..i + len).fold(0, |acc, j| (acc << 1) | self.bit(j) as u32)
    }
}
