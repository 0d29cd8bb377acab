use std::time::{Duration, Instant};

use lazy_static::lazy_static;
use log::error;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::coord::{CoordCube, Phase2Coords};
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::facelet::FaceCube;
use crate::moves::{Move, MoveTables};
use crate::pruning::PruningTables;
use crate::scramble::scramble_from_str;

/// All transition and pruning tables, built once per process and shared
/// read-only by every solve call.
pub struct SolverTables {
    pub mv: MoveTables,
    pub pr: PruningTables,
}

impl SolverTables {
    fn new() -> Self {
        let mv = MoveTables::new();
        let pr = PruningTables::new(&mv);
        Self { mv, pr }
    }
}

lazy_static! {
    static ref TABLES: SolverTables = SolverTables::new();
}

/// The process-wide tables. The first caller pays for construction; the
/// initialization acts as the barrier, so no search ever observes a
/// partially built table.
pub fn tables() -> &'static SolverTables {
    &TABLES
}

/// Search knobs.
///
/// * `max_total_moves`: ceiling on the length of the returned sequence.
/// * `time_budget`: without one, the first solution found is returned;
///   with one, the search keeps trading longer phase 1 prefixes for
///   shorter totals until the budget runs out, then returns the best
///   solution so far ([`Error::Timeout`] if there is none).
#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub max_total_moves: usize,
    pub time_budget: Option<Duration>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_total_moves: MAX_SOLUTION_MOVES,
            time_budget: None,
        }
    }
}

/// A found maneuver and the wall-clock time the search took (table
/// construction not included).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Solution {
    pub moves: Vec<Move>,
    pub solve_time: Duration,
}

/// Solve a cube given as a facelet string.
///
/// # Examples
/// ```no_run
/// use twophase::solver::{solve, SolveOptions};
///
/// let result = solve(
///     "RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF",
///     &SolveOptions::default(),
/// )
/// .unwrap();
/// println!("{:?} ({} moves)", result.moves, result.moves.len());
/// ```
pub fn solve(facelets: &str, options: &SolveOptions) -> Result<Solution, Error> {
    let fc = FaceCube::try_from(facelets)?;
    let cc = CubieCube::try_from(&fc)?;
    solve_cubie(&cc, options)
}

/// Solve the state reached by applying a scramble to the solved cube.
pub fn solve_scramble(scramble: &str, options: &SolveOptions) -> Result<Solution, Error> {
    let moves = scramble_from_str(scramble)?;
    solve_cubie(&CubieCube::from(&moves[..]), options)
}

/// Solve a cubie-level state.
pub fn solve_cubie(cc: &CubieCube, options: &SolveOptions) -> Result<Solution, Error> {
    if !cc.is_solvable() {
        return Err(Error::UnsolvableCube);
    }
    let start = Instant::now();
    let tables = tables();
    let root = CoordCube::from_cubie(cc)?;
    let mut search = Search {
        mv: &tables.mv,
        pr: &tables.pr,
        start_cubie: *cc,
        max_total: options.max_total_moves,
        deadline: options.time_budget.map(|budget| start + budget),
        first_found: options.time_budget.is_none(),
        sofar1: Vec::new(),
        sofar2: Vec::new(),
        best: None,
        nodes: 0,
        stop: false,
    };
    let moves = search.run(root)?;
    Ok(Solution {
        moves,
        solve_time: start.elapsed(),
    })
}

/// One in-flight two-phase search. Owns its working buffers; nothing is
/// shared with concurrent solves except the read-only tables.
struct Search<'a> {
    mv: &'a MoveTables,
    pr: &'a PruningTables,
    start_cubie: CubieCube,
    max_total: usize,
    deadline: Option<Instant>,
    first_found: bool,
    sofar1: Vec<Move>,
    sofar2: Vec<Move>,
    best: Option<Vec<Move>>,
    nodes: u64,
    stop: bool,
}

impl Search<'_> {
    /// Iterative deepening on the phase 1 length. Every completed
    /// solution obeys `max_total`, so the first one found at the smallest
    /// phase 1 depth is already within the ceiling.
    fn run(&mut self, root: CoordCube) -> Result<Vec<Move>, Error> {
        let dist = self.pr.phase1_depth(root.flip, root.twist, root.slice) as usize;
        for togo1 in dist..=self.max_total.min(MAX_PHASE1_DEPTH) {
            if self.stop {
                break;
            }
            if let Some(best) = &self.best {
                // a phase 1 prefix this long cannot beat the best total
                if best.len() <= togo1 {
                    break;
                }
            }
            self.sofar1.clear();
            self.phase1(root, dist, togo1);
        }
        match self.best.take() {
            Some(moves) => Ok(moves),
            None => {
                if self.deadline_passed() {
                    return Err(Error::Timeout);
                }
                error!("two-phase search exhausted with no solution; unreachable for valid input");
                Err(Error::SearchExhausted)
            }
        }
    }

    /// Cooperative cancellation: the deadline is polled every few
    /// thousand node expansions, so a timeout lands promptly even in the
    /// middle of a phase.
    fn tick(&mut self) -> bool {
        if self.stop {
            return true;
        }
        self.nodes += 1;
        if self.nodes % 4096 == 0 && self.deadline_passed() {
            self.stop = true;
            return true;
        }
        false
    }

    fn deadline_passed(&self) -> bool {
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    /// Depth-first search for a phase 1 prefix of exactly `togo` moves.
    /// `dist` is the heuristic value of the current node.
    fn phase1(&mut self, cube: CoordCube, dist: usize, togo: usize) {
        if self.tick() {
            return;
        }
        if togo == 0 {
            if cube.is_solved() {
                self.phase2_entry();
            }
            return;
        }
        for m in ALL_MOVES {
            // inside G1 with few moves left, every useful remaining move
            // preserves G1; leave those maneuvers to phase 2
            if dist == 0 && togo < 5 && m.preserves_g1() {
                continue;
            }
            if !m.allowed_after(self.sofar1.last().copied()) {
                continue;
            }
            let mut next = cube;
            next.phase1_move(self.mv, m);
            let dist1 = self.pr.phase1_depth(next.flip, next.twist, next.slice) as usize;
            if dist1 >= togo {
                // G1 is out of reach in the remaining budget
                continue;
            }
            self.sofar1.push(m);
            self.phase1(next, dist1, togo - 1);
            self.sofar1.pop();
            if self.stop {
                return;
            }
        }
    }

    /// A phase 1 prefix is complete: project the phase 2 coordinates by
    /// replaying it on the cubie level, then look for a suffix that fits
    /// the remaining budget.
    fn phase2_entry(&mut self) {
        let cc = self.start_cubie.apply_moves(&self.sofar1);
        let p2 = Phase2Coords::from_cubie(&cc);
        let n1 = self.sofar1.len();
        let cap = match &self.best {
            Some(best) => best.len().saturating_sub(1), // must strictly improve
            None => self.max_total,
        }
        .min(self.max_total);
        if cap < n1 {
            return;
        }
        let budget = (cap - n1).min(MAX_PHASE2_DEPTH);
        let dist2 = self.pr.phase2_depth(p2.corners, p2.ud_edges, p2.slice_perm) as usize;
        for togo2 in dist2..=budget {
            self.sofar2.clear();
            if self.phase2(p2, togo2) {
                break;
            }
            if self.stop {
                return;
            }
        }
    }

    /// Depth-first search over the G1-preserving moves for a suffix of
    /// exactly `togo` moves.
    fn phase2(&mut self, cube: Phase2Coords, togo: usize) -> bool {
        if self.tick() {
            return false;
        }
        if togo == 0 {
            if cube.is_solved() {
                self.record();
                return true;
            }
            return false;
        }
        for m in PHASE2_MOVES {
            let prev = self.sofar2.last().or(self.sofar1.last()).copied();
            if !m.allowed_after(prev) {
                continue;
            }
            let mut next = cube;
            next.phase2_move(self.mv, m);
            if self.pr.phase2_depth(next.corners, next.ud_edges, next.slice_perm) as usize >= togo {
                continue;
            }
            self.sofar2.push(m);
            let found = self.phase2(next, togo - 1);
            self.sofar2.pop();
            if found {
                return true;
            }
            if self.stop {
                return false;
            }
        }
        false
    }

    fn record(&mut self) {
        let mut solution = self.sofar1.clone();
        solution.extend_from_slice(&self.sofar2);
        let better = self
            .best
            .as_ref()
            .map_or(true, |best| solution.len() < best.len());
        if better {
            self.best = Some(solution);
            if self.first_found {
                self.stop = true;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scramble::{scramble_to_facelets, scramble_to_str};
    use crate::{apply_moves, validate};

    #[test]
    fn test_solved_cube_needs_no_moves() {
        let result = solve(SOLVED_FACELETS, &SolveOptions::default()).unwrap();
        assert!(result.moves.is_empty());
    }

    #[test]
    fn test_sexy_move_scramble() {
        let state = apply_moves(SOLVED_FACELETS, "R U R' U'").unwrap();
        let result = solve(&state, &SolveOptions::default()).unwrap();
        assert!(result.moves.len() <= 20);
        let solution = scramble_to_str(&result.moves);
        assert_eq!(apply_moves(&state, &solution).unwrap(), SOLVED_FACELETS);
    }

    #[test]
    fn test_solution_solves_the_cube() {
        for scramble in [
            "R U R' U'",
            "F2 D L",
            "B' U2 L F D'",
            "R U2 F' L D B2 U' R2",
            "D F L2 B' R U F2 D' L' B",
        ] {
            let state = scramble_to_facelets(&scramble_from_str(scramble).unwrap());
            let result = solve(&state, &SolveOptions::default()).unwrap();
            assert!(result.moves.len() <= 20, "scramble {scramble}");
            let solved = apply_moves(&state, &scramble_to_str(&result.moves)).unwrap();
            assert_eq!(solved, SOLVED_FACELETS, "scramble {scramble}");
        }
    }

    #[test]
    fn test_solve_scramble_matches_solve() {
        let result = solve_scramble("R U R' U'", &SolveOptions::default()).unwrap();
        let state = scramble_to_facelets(&scramble_from_str("R U R' U'").unwrap());
        assert_eq!(
            apply_moves(&state, &scramble_to_str(&result.moves)).unwrap(),
            SOLVED_FACELETS
        );
    }

    #[test]
    fn test_random_scramble_solves() {
        let scramble = crate::scramble::gen_scramble(10);
        let state = scramble_to_facelets(&scramble);
        let result = solve(&state, &SolveOptions::default()).unwrap();
        assert!(result.moves.len() <= 20);
        let solved = apply_moves(&state, &scramble_to_str(&result.moves)).unwrap();
        assert_eq!(solved, SOLVED_FACELETS);
    }

    #[test]
    fn test_unsolvable_rejected() {
        // one corner twisted in place: orientation sum is 1 mod 3
        let mut cc = CubieCube::default();
        cc.co[0] = 1;
        let twisted = FaceCube::from(&cc).to_string();
        assert!(!validate(&twisted));
        assert!(matches!(
            solve(&twisted, &SolveOptions::default()),
            Err(Error::UnsolvableCube)
        ));
    }

    #[test]
    fn test_time_budget_returns_some_solution() {
        let state = scramble_to_facelets(&scramble_from_str("L2 F D' R B2 U L' F2").unwrap());
        let options = SolveOptions {
            max_total_moves: 20,
            time_budget: Some(Duration::from_secs(5)),
        };
        let result = solve(&state, &options).unwrap();
        assert!(result.moves.len() <= 20);
        let solved = apply_moves(&state, &scramble_to_str(&result.moves)).unwrap();
        assert_eq!(solved, SOLVED_FACELETS);
    }

    #[test]
    fn test_exhausted_when_ceiling_too_low() {
        // an eight-move scramble cannot be undone in two moves
        let state = scramble_to_facelets(&scramble_from_str("R U2 F' L D B2 U' R2").unwrap());
        let options = SolveOptions {
            max_total_moves: 2,
            time_budget: None,
        };
        assert!(matches!(
            solve(&state, &options),
            Err(Error::SearchExhausted)
        ));
    }
}
