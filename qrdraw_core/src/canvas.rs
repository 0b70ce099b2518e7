use bitvec::{slice::BitSlice, vec::BitVec};

/// Module (aka, a cell) of a QR code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    Light,
    Dark,
}

impl Module {
    /// Whether the module is drawn with the foreground color.
    /// # Example
    /// ```
    /// use qrdraw_core::Module;
    /// assert!(Module::Dark.is_dark());
    /// assert!(!Module::Light.is_dark());
    /// ```
    pub fn is_dark(self) -> bool {
        self == Module::Dark
    }
}

impl From<bool> for Module {
    fn from(value: bool) -> Self {
        match value {
            true => Module::Dark,
            false => Module::Light,
        }
    }
}

impl From<Module> for bool {
    fn from(value: Module) -> Self {
        match value {
            Module::Dark => true,
            Module::Light => false,
        }
    }
}

/// A square matrix of bits.
#[derive(Debug)]
struct BitMatrix {
    data: BitVec,
    size: usize,
}

impl BitMatrix {
    /// Return a matrix of size `size` filled with `value`.
    pub fn filled(size: usize, value: bool) -> Self {
        Self {
            data: BitVec::repeat(value, size * size),
            size,
        }
    }

    /// Get the size of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the 1D index of the data array corresponding to position `(i, j)`, checking for validity.
    #[inline]
    fn linearized_index(&self, i: usize, j: usize) -> Option<usize> {
        if i < self.size && j < self.size {
            Some(self.size * i + j)
        } else {
            None
        }
    }

    /// Get the bit at position `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<bool> {
        self.data
            .get(self.linearized_index(i, j)?)
            .map(|bit| *bit)
    }

    /// Iterate over the rows of the matrix, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &BitSlice> + '_ {
        // `chunks_exact(0)` panics, and an empty matrix has no rows anyway.
        self.data.chunks_exact(self.size.max(1))
    }
}

/// A square canvas of modules, indexed as `(row, column)`.
#[derive(Debug)]
pub struct Canvas {
    matrix: BitMatrix,
}

impl Canvas {
    /// Return a canvas of size `size` filled with `module`.
    #[inline]
    pub fn filled(size: usize, module: Module) -> Self {
        Self {
            matrix: BitMatrix::filled(size, module.into()),
        }
    }

    /// Build a canvas of size `size` from modules given in row-major order. Returns `None` if `modules` does not
    /// yield exactly `size * size` items.
    /// # Example
    /// ```
    /// use qrdraw_core::{Canvas, Module};
    /// let canvas = Canvas::from_modules(2, [true, false, false, true]).unwrap();
    /// assert_eq!(canvas.get(1, 1), Some(Module::Dark));
    /// assert!(Canvas::from_modules(2, [true]).is_none());
    /// ```
    pub fn from_modules<I, M>(size: usize, modules: I) -> Option<Self>
    where
        I: IntoIterator<Item = M>,
        M: Into<Module>,
    {
        let data: BitVec = modules
            .into_iter()
            .map(|module| bool::from(module.into()))
            .collect();
        if data.len() != size * size {
            return None;
        }
        Some(Self {
            matrix: BitMatrix { data, size },
        })
    }

    /// Get the size of the canvas.
    #[inline]
    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    /// Get the module at position `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<Module> {
        self.matrix.get(i, j).map(Module::from)
    }

    /// Iterate over the rows of the canvas, each yielding its modules left to right.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = Module> + '_> + '_ {
        self.matrix
            .rows()
            .map(|row| row.iter().by_vals().map(Module::from))
    }

    /// Count the dark modules.
    pub fn dark_count(&self) -> usize {
        self.matrix.data.count_ones()
    }
}

impl AsRef<Canvas> for Canvas {
    fn as_ref(&self) -> &Canvas {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get() {
        let canvas = Canvas::from_modules(3, (0..9).map(|k| k == 2)).unwrap();
        assert_eq!(canvas.get(0, 2), Some(Module::Dark));
        assert_eq!(canvas.get(2, 0), Some(Module::Light));
        assert_eq!(canvas.get(3, 0), None);
        assert_eq!(canvas.get(0, 3), None);
        assert_eq!(canvas.dark_count(), 1);
    }

    #[test]
    fn test_filled() {
        assert_eq!(Canvas::filled(4, Module::Dark).dark_count(), 16);
        assert_eq!(Canvas::filled(4, Module::Light).dark_count(), 0);
    }

    #[test]
    fn test_rows_are_row_major() {
        let canvas = Canvas::from_modules(2, [true, true, false, true]).unwrap();
        let rows: Vec<Vec<Module>> = canvas.rows().map(Iterator::collect).collect();
        assert_eq!(
            rows,
            vec![
                vec![Module::Dark, Module::Dark],
                vec![Module::Light, Module::Dark],
            ]
        );
    }

    #[test]
    fn test_empty_canvas_has_no_rows() {
        let canvas = Canvas::filled(0, Module::Light);
        assert_eq!(canvas.rows().count(), 0);
    }
}
