use super::*;

impl Game {
    /// What the player knows about the current floor: explored tiles, with
    /// items and monsters drawn only where they are in sight.
    pub fn render_view(&self) -> String {
        let grid = &self.floor.grid;
        let mut cells: Vec<Vec<char>> = (0..grid.height())
            .map(|y| {
                (0..grid.width())
                    .map(|x| {
                        let tile = grid.tile(Pos::new(x as i32, y as i32));
                        if tile.explored { tile.glyph() } else { ' ' }
                    })
                    .collect()
            })
            .collect();

        let mut draw = |pos: Pos, glyph: char| {
            let row = cells.get_mut(pos.y as usize);
            if let Some(cell) = row.and_then(|row| row.get_mut(pos.x as usize)) {
                *cell = glyph;
            }
        };
        for id in self.floor.visible_items() {
            let floor_item = &self.floor.items[id];
            draw(floor_item.pos, floor_item.item.glyph);
        }
        for id in self.floor.visible_monsters() {
            let monster = &self.floor.monsters[id];
            draw(monster.pos, monster.glyph);
        }
        draw(self.player.pos, '@');

        let mut text = String::with_capacity((grid.width() + 1) * grid.height());
        for row in cells {
            text.extend(row);
            text.push('\n');
        }
        text
    }
}
