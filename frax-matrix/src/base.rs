use frax::{Error, Result};

pub trait MatType {
    fn shape(&self) -> (usize, usize);
    fn rows(&self) -> usize { self.shape().0 }
    fn cols(&self) -> usize { self.shape().1 }
    fn is_square(&self) -> bool {
        let (m, n) = self.shape();
        m == n
    }
    fn is_empty(&self) -> bool {
        let (m, n) = self.shape();
        m == 0 || n == 0
    }

    fn check_index(&self, i: usize, j: usize) -> Result<()> {
        let (m, n) = self.shape();
        if i < m && j < n {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange((i, j), (m, n)))
        }
    }

    fn check_same_shape<M: MatType>(&self, other: &M) -> Result<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(Error::DimensionMismatch(self.shape(), other.shape()))
        }
    }
}
