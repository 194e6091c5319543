//! Status line, inventory listing, and command help.

use crate::character::Player;
use crate::combat::Enemy;

pub fn status_line(player: &Player) -> String {
    format!(
        "HP: {}/{}  ATK: {}  DEF: {}  Keys: {}  Level: {}  EXP: {}",
        player.hp,
        player.max_hp,
        player.attack_value(),
        player.defense_value(),
        player.keys,
        player.level,
        player.exp
    )
}

pub fn enemy_line(enemy: &Enemy) -> String {
    format!(
        "Enemy: {} HP={}, ATK={}, DEF={}",
        enemy.name, enemy.hp, enemy.attack, enemy.defense
    )
}

pub fn inventory_lines(player: &Player) -> Vec<String> {
    if player.inventory.is_empty() {
        return vec!["Your inventory is empty.".to_string()];
    }
    let mut lines = vec!["Inventory:".to_string()];
    lines.extend(player.inventory.iter().enumerate().map(|(idx, item)| {
        format!(
            " {}: {} ({}) {} - {}",
            idx,
            item.name(),
            item.kind_label(),
            item.stat_label(),
            item.description()
        )
    }));
    lines
}

pub fn exploration_help() -> &'static str {
    "Commands: w/a/s/d - move, map - map, inv - inventory, use N - use consumable, \
     equip N - equip, stats - status, help - this text, q - quit"
}

pub fn combat_help() -> &'static str {
    "Choose: hit (attack), flee (run), stats, inv, equip N, use N"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::items::Item;

    #[test]
    fn test_status_line_includes_equipment() {
        let mut player = Player::new(&GameConfig::default(), (0, 0));
        player.add_item(Item::weapon(3));
        player.equip_from_inventory(0).unwrap();
        player.keys = 1;
        assert_eq!(
            status_line(&player),
            "HP: 100/100  ATK: 5  DEF: 0  Keys: 1  Level: 1  EXP: 0"
        );
    }

    #[test]
    fn test_inventory_lines_indexed() {
        let mut player = Player::new(&GameConfig::default(), (0, 0));
        assert_eq!(inventory_lines(&player), vec!["Your inventory is empty."]);

        player.add_item(Item::potion(10));
        player.add_item(Item::armor(2));
        let lines = inventory_lines(&player);
        assert_eq!(lines[1], " 0: Potion (Consumable) HEAL+10 - Restores 10 HP");
        assert_eq!(lines[2], " 1: Armor +2 (Armor) DEF+2 - +2 defense");
    }
}
