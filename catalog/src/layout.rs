use keystrike_core::{Battlefield, Point, SlotKey};

/// QWERTY rows from top to bottom.
pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Horizontal stagger of each row, in key widths.
const ROW_STAGGER: [f32; 3] = [0.0, 0.25, 0.75];

/// Distance of each row's firing points above the bottom edge.
const ROW_LIFT: [f32; 3] = [60.0, 40.0, 20.0];

/// Mapping of keyboard keys onto screen-space firing points.
///
/// Keys keep the physical arrangement of the keyboard: each row is staggered
/// like the keycaps and the top row sits highest on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardLayout {
    slots: Vec<(SlotKey, Point)>,
}

impl KeyboardLayout {
    /// Spreads the QWERTY rows across the width of the battle area.
    #[must_use]
    pub fn qwerty(battlefield: &Battlefield) -> Self {
        let columns = KEYBOARD_ROWS
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(1) as f32;
        let key_width = battlefield.width / columns;

        let mut slots = Vec::new();
        for (row_index, row) in KEYBOARD_ROWS.iter().enumerate() {
            let y = battlefield.height - ROW_LIFT[row_index];
            for (column, key) in row.chars().enumerate() {
                let x = (ROW_STAGGER[row_index] + column as f32 + 0.5) * key_width;
                slots.push((SlotKey::new(key), Point::new(x, y)));
            }
        }
        slots.sort_by_key(|(key, _)| *key);

        Self { slots }
    }

    /// Firing point bound to the key, if the key belongs to the layout.
    #[must_use]
    pub fn origin(&self, key: SlotKey) -> Option<Point> {
        self.slots
            .binary_search_by_key(&key, |(slot, _)| *slot)
            .ok()
            .map(|index| self.slots[index].1)
    }

    /// Iterator over keys and firing points in key order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, Point)> + '_ {
        self.slots.iter().copied()
    }

    /// Number of keys in the layout.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Reports whether the layout has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
