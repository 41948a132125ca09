/// A fixed-size 2D grid of values stored row-major.
///
/// Rows grow along world z, columns along world x. Unlike a wrapping world map,
/// the maze has hard edges: every accessor is bounds-checked.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub rows: usize,
    pub cols: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }
}

impl<T> Tilemap<T> {
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        self.contains(row, col).then(|| row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.index(row, col).map(|idx| &self.data[idx])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.index(row, col).map(move |idx| &mut self.data[idx])
    }

    /// Store a value. Returns false (and stores nothing) when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.data[idx] = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over all cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let cols = self.cols;
        self.data.iter().enumerate().map(move |(idx, val)| {
            (idx / cols, idx % cols, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let cols = self.cols;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            (idx / cols, idx % cols, val)
        })
    }

    /// Count cells matching a predicate.
    pub fn count_where<F: Fn(&T) -> bool>(&self, predicate: F) -> usize {
        self.data.iter().filter(|v| predicate(v)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_checked_access() {
        let mut map: Tilemap<u8> = Tilemap::new(3, 4);
        assert!(map.set(2, 3, 7));
        assert_eq!(map.get(2, 3), Some(&7));
        assert_eq!(map.get(3, 0), None);
        assert_eq!(map.get(0, 4), None);
        assert!(!map.set(5, 5, 1));
        assert_eq!(map.len(), 12);
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut map = Tilemap::new_with(2, 3, 0usize);
        for (row, col, val) in map.iter_mut() {
            *val = row * 10 + col;
        }
        let collected: Vec<usize> = map.iter().map(|(_, _, v)| *v).collect();
        assert_eq!(collected, vec![0, 1, 2, 10, 11, 12]);
        assert_eq!(map.count_where(|v| *v >= 10), 3);
    }
}
