use image::Rgb;
use std::collections::HashMap;

/// An ordered list of colors. Pixels refer to a color by its position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<Rgb<u8>>,
}

impl Palette {
    /// Wraps colors read back from a container, in their stored order.
    pub fn from_colors(colors: Vec<Rgb<u8>>) -> Palette {
        Palette { colors }
    }

    pub fn colors(&self) -> &[Rgb<u8>] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgb<u8>> {
        self.colors.get(index).copied()
    }

    /// Maps every color to its index.
    ///
    /// If the palette holds the same color twice, the first index wins.
    pub fn index_map(&self) -> HashMap<Rgb<u8>, usize> {
        let mut map = HashMap::with_capacity(self.colors.len());
        for (index, &color) in self.colors.iter().enumerate() {
            map.entry(color).or_insert(index);
        }
        map
    }
}

/// Builds the palette of an image from its pixels in row-major order.
///
/// Colors are sorted from most to least frequent. Colors that occur equally
/// often keep the order in which they were first seen.
pub fn build_palette<'a, I>(pixels: I) -> Palette
where
    I: IntoIterator<Item = &'a Rgb<u8>>,
{
    // color -> (occurrences, first position in the scan)
    let mut counts: HashMap<Rgb<u8>, (u64, usize)> = HashMap::new();
    for (position, &pixel) in pixels.into_iter().enumerate() {
        counts.entry(pixel).or_insert((0, position)).0 += 1;
    }

    let mut colors: Vec<(Rgb<u8>, (u64, usize))> = counts.into_iter().collect();
    colors.sort_unstable_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });

    Palette {
        colors: colors.into_iter().map(|(color, _)| color).collect(),
    }
}

#[cfg(test)]
mod test {
    use super::{build_palette, Palette};
    use image::Rgb;
    use rand::Rng;
    use std::collections::HashSet;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    #[test]
    fn test_single_color() {
        let palette = build_palette(&[RED, RED]);
        assert_eq!(palette.colors(), &[RED]);
    }

    #[test]
    fn test_sorted_by_frequency() {
        let pixels = [WHITE, RED, BLACK, BLACK, RED, BLACK];
        let palette = build_palette(&pixels);
        assert_eq!(palette.colors(), &[BLACK, RED, WHITE]);
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let palette = build_palette(&[WHITE, BLACK, RED, RED, BLACK, WHITE]);
        assert_eq!(palette.colors(), &[WHITE, BLACK, RED]);

        let palette = build_palette(&[RED, BLACK, WHITE]);
        assert_eq!(palette.colors(), &[RED, BLACK, WHITE]);
    }

    #[test]
    fn test_palette_is_unique() {
        let mut rng = rand::thread_rng();
        let pixels: Vec<Rgb<u8>> = (0..5000)
            .map(|_| Rgb([rng.gen_range(0..8), rng.gen_range(0..8), 0]))
            .collect();

        let palette = build_palette(&pixels);
        let distinct: HashSet<Rgb<u8>> = pixels.iter().copied().collect();
        let in_palette: HashSet<Rgb<u8>> = palette.colors().iter().copied().collect();

        assert_eq!(palette.len(), distinct.len());
        assert_eq!(in_palette, distinct);
    }

    #[test]
    fn test_deterministic() {
        let mut rng = rand::thread_rng();
        let pixels: Vec<Rgb<u8>> = (0..2000)
            .map(|_| Rgb([rng.gen_range(0..4), rng.gen_range(0..4), rng.gen_range(0..4)]))
            .collect();

        assert_eq!(build_palette(&pixels), build_palette(&pixels));
    }

    #[test]
    fn test_index_map() {
        let palette = Palette::from_colors(vec![BLACK, RED, BLACK]);
        let map = palette.index_map();
        assert_eq!(map[&BLACK], 0);
        assert_eq!(map[&RED], 1);
        assert_eq!(map.len(), 2);
        assert_eq!(palette.get(1), Some(RED));
        assert_eq!(palette.get(3), None);
    }

    #[test]
    fn test_empty() {
        let palette = build_palette(&Vec::<Rgb<u8>>::new());
        assert!(palette.is_empty());
    }
}
