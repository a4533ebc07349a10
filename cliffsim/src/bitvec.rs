use ref_cast::RefCast;
pub use std::ops::{BitXorAssign, Deref, DerefMut, Index, IndexMut, Range};

/// A block of bits. This is an alias for [`u64`]
pub type BitBlock = u64;

/// Number of bits in a [`BitBlock`]
pub const BLOCKSIZE: usize = 64;

/// Bitwise AND with this constant to set most signficant bit to zero
pub const MSB_OFF: BitBlock = 0x7fffffffffffffff;

/// Bitwise OR with this constant to set most signficant bit to one
pub const MSB_ON: BitBlock = 0x8000000000000000;

/// The number of [`BitBlock`]s needed to hold `bits` bits, rounding up.
#[inline]
pub fn min_blocks(bits: usize) -> usize {
    bits / BLOCKSIZE + if bits % BLOCKSIZE == 0 { 0 } else { 1 }
}

/// An owned, growable sequence of bits packed into [`BitBlock`]s.
///
/// Bit `i` lives in block `i / BLOCKSIZE`, counting from the most significant bit of that
/// block. Most of the useful methods come from dereferencing to [`BitRange`].
///
/// ```
/// use cliffsim::bitvec::*;
///
/// let mut bv = BitVec::zeros(2);
/// bv.set_bit(70, true);
/// assert!(bv.bit(70));
/// assert!(!bv.bit(69));
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct BitVec(Vec<BitBlock>);

/// A borrowed run of [`BitBlock`]s, e.g. a single row of a [`crate::BitMatrix`].
#[derive(RefCast, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct BitRange([BitBlock]);

/// Iterator over the bits of a [`BitRange`], most significant bit of the first block first.
pub struct BitRangeIter<'a> {
    inner: std::slice::Iter<'a, BitBlock>,
    c: usize,
    block: BitBlock,
}

impl Iterator for BitRangeIter<'_> {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        if self.c == BLOCKSIZE {
            self.block = self.inner.next().copied()?;
            self.c = 0;
        }
        let bit = self.block & MSB_ON == MSB_ON;
        self.block <<= 1;
        self.c += 1;
        Some(bit)
    }
}

impl BitRange {
    #[inline]
    pub fn iter(&self) -> BitRangeIter<'_> {
        BitRangeIter {
            inner: self.0.iter(),
            c: BLOCKSIZE,
            block: 0,
        }
    }

    /// Inner product over GF(2): the parity of the number of positions where both are 1.
    #[inline]
    pub fn dot(&self, rhs: &BitRange) -> bool {
        let mut c = 0;
        for (bits0, bits1) in self.0.iter().zip(rhs.0.iter()) {
            c ^= (*bits0 & *bits1).count_ones() & 1;
        }
        c == 1
    }

    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        let block_index = index / BLOCKSIZE;
        let bit_index = (index % BLOCKSIZE) as u32;
        let block = self.0[block_index].rotate_left(bit_index);
        block & MSB_ON == MSB_ON
    }

    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[inline]
    pub fn set_bit(&mut self, index: usize, value: bool) {
        let block_index = index / BLOCKSIZE;
        let bit_index = (index % BLOCKSIZE) as u32;
        let mut block = self.0[block_index].rotate_left(bit_index);
        if value {
            block |= MSB_ON;
        } else {
            block &= MSB_OFF;
        }
        self.0[block_index] = block.rotate_right(bit_index);
    }

    /// Flips the bit at `index` when `value` is true.
    #[inline]
    pub fn xor_bit(&mut self, index: usize, value: bool) {
        if value {
            let block_index = index / BLOCKSIZE;
            self.0[block_index] ^= MSB_ON >> (index % BLOCKSIZE);
        }
    }

    /// Block-wise `self[target..target+len] ^= self[source..source+len]`.
    pub fn xor_range(&mut self, source: usize, target: usize, len: usize) {
        for i in 0..len {
            self.0[target + i] ^= self.0[source + i];
        }
    }

    /// Block-wise `self[target..target+len] = self[source..source+len]`.
    pub fn copy_range(&mut self, source: usize, target: usize, len: usize) {
        self.0.copy_within(source..source + len, target);
    }

    pub fn zero_range(&mut self, start: usize, len: usize) {
        self.0[start..start + len].fill(0);
    }

    /// Number of blocks, not bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Index<Range<usize>> for BitRange {
    type Output = BitRange;
    fn index(&self, index: Range<usize>) -> &Self::Output {
        BitRange::ref_cast(&self.0[index])
    }
}

impl IndexMut<Range<usize>> for BitRange {
    fn index_mut(&mut self, index: Range<usize>) -> &mut Self::Output {
        BitRange::ref_cast_mut(self.0.index_mut(index))
    }
}

impl BitVec {
    #[inline]
    pub fn zeros(num_blocks: usize) -> Self {
        BitVec(vec![0; num_blocks])
    }
}

impl BitXorAssign<&Self> for BitRange {
    #[inline]
    fn bitxor_assign(&mut self, rhs: &BitRange) {
        for (bits0, bits1) in self.0.iter_mut().zip(rhs.0.iter()) {
            *bits0 ^= bits1;
        }
    }
}

/// Packs bits MSB-first, padding the last block with zeros, so `n` bits always take
/// [`min_blocks`]`(n)` blocks.
impl FromIterator<bool> for BitVec {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        let mut blocks: Vec<BitBlock> = Vec::new();
        for (index, bit) in iter.into_iter().enumerate() {
            let offset = index % BLOCKSIZE;
            if offset == 0 {
                blocks.push(0);
            }
            if let (true, Some(block)) = (bit, blocks.last_mut()) {
                *block |= MSB_ON >> offset;
            }
        }
        BitVec(blocks)
    }
}

impl Deref for BitVec {
    type Target = BitRange;
    fn deref(&self) -> &Self::Target {
        BitRange::ref_cast(&self.0)
    }
}

impl DerefMut for BitVec {
    fn deref_mut(&mut self) -> &mut Self::Target {
        BitRange::ref_cast_mut(&mut self.0)
    }
}
