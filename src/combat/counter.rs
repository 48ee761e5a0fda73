use crate::core::types::MoveType;

/// Counter cycle: Sword -> Spell -> Shield -> Sword
impl MoveType {
    /// The move this one beats
    pub fn beats(self) -> MoveType {
        match self {
            MoveType::Sword => MoveType::Spell,
            MoveType::Spell => MoveType::Shield,
            MoveType::Shield => MoveType::Sword,
        }
    }

    /// The move that beats this one
    pub fn beaten_by(self) -> MoveType {
        match self {
            MoveType::Sword => MoveType::Shield,
            MoveType::Spell => MoveType::Sword,
            MoveType::Shield => MoveType::Spell,
        }
    }

    /// True if playing `self` against `other` wins the exchange
    pub fn counters(self, other: MoveType) -> bool {
        self.beats() == other
    }
}
