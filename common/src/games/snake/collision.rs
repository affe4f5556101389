use std::collections::{HashSet, VecDeque};

use super::types::{Cell, DeathReason, FieldSize};

/// Checks the head (`body[0]`) against the walls, the rest of the body and
/// the obstacles. Any hit ends the session.
pub fn detect_collision(
    field_size: &FieldSize,
    body: &VecDeque<Cell>,
    obstacles: &HashSet<Cell>,
) -> Option<DeathReason> {
    let head = body.front()?;

    if !field_size.contains(head) {
        return Some(DeathReason::WallCollision);
    }
    if body.iter().skip(1).any(|segment| segment == head) {
        return Some(DeathReason::SelfCollision);
    }
    if obstacles.contains(head) {
        return Some(DeathReason::ObstacleCollision);
    }
    None
}
