/// CemaNeige model state variables.
///
/// One snow pack per elevation band, zeroed at the start of every run.
use smallvec::SmallVec;

use super::constants::LAYER_STATE_SIZE;

/// Snow state of one elevation band.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayerState {
    /// Snow water equivalent `g` [mm].
    pub snow_pack: f64,
    /// Thermal state `eTg` [C], never positive.
    pub thermal_state: f64,
}

impl LayerState {
    pub fn to_array(&self) -> [f64; LAYER_STATE_SIZE] {
        [self.snow_pack, self.thermal_state]
    }
}

/// Multi-band CemaNeige state.
///
/// Most basins use five bands, which stay inline.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub layer_states: SmallVec<[LayerState; 5]>,
}

impl State {
    /// Empty, isothermal snow packs for `n_layers` bands.
    pub fn initialize(n_layers: usize) -> Self {
        Self {
            layer_states: smallvec::smallvec![LayerState::default(); n_layers],
        }
    }

    pub fn n_layers(&self) -> usize {
        self.layer_states.len()
    }

    /// Zero every band in place.
    pub fn reset(&mut self) {
        self.layer_states.fill(LayerState::default());
    }

    /// Basin snow storage [mm]. Band packs are already area-weighted.
    pub fn total_snow_pack(&self) -> f64 {
        self.layer_states.iter().map(|l| l.snow_pack).sum()
    }

    /// Flatten to `[g_0, etg_0, g_1, etg_1, ...]`.
    pub fn to_array(&self) -> Vec<f64> {
        let mut arr = Vec::with_capacity(self.n_layers() * LAYER_STATE_SIZE);
        for ls in &self.layer_states {
            arr.extend_from_slice(&ls.to_array());
        }
        arr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_is_zeroed() {
        let s = State::initialize(3);
        assert_eq!(s.n_layers(), 3);
        for ls in &s.layer_states {
            assert_eq!(ls.snow_pack, 0.0);
            assert_eq!(ls.thermal_state, 0.0);
        }
    }

    #[test]
    fn reset_clears_snow() {
        let mut s = State::initialize(2);
        s.layer_states[0].snow_pack = 50.0;
        s.layer_states[1].thermal_state = -2.0;
        s.reset();
        assert_eq!(s, State::initialize(2));
    }

    #[test]
    fn flat_layout() {
        let mut s = State::initialize(2);
        s.layer_states[0].snow_pack = 50.0;
        s.layer_states[1].thermal_state = -2.0;
        assert_eq!(s.to_array(), vec![50.0, 0.0, 0.0, -2.0]);
    }

    #[test]
    fn total_snow_pack() {
        let mut s = State::initialize(4);
        s.layer_states[1].snow_pack = 15.0;
        s.layer_states[3].snow_pack = 40.0;
        assert_eq!(s.total_snow_pack(), 55.0);
    }
}
