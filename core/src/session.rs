use alloc::vec::Vec;
use rand::Rng;
use serde::Serialize;

use crate::*;

/// One player's run over a board. Owns the pawn, chart and ledger and tracks
/// which screen the host should show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Session {
    board: Board,
    config: GameConfig,
    pawn: Pawn,
    chart: ToothChart,
    ledger: Ledger,
    screen: Screen,
}

impl Session {
    pub fn new(board: Board, config: GameConfig) -> Self {
        let config = config.clamped();
        Self {
            board,
            config,
            pawn: Pawn::new(),
            chart: ToothChart::new(Stage::Child),
            ledger: Ledger::new(config.starting_coins),
            screen: Screen::Board,
        }
    }

    /// Staff reset: back to the start with a fresh child chart and the starting
    /// balance.
    pub fn reset(&mut self) {
        *self = Self::new(self.board.clone(), self.config);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn pawn(&self) -> &Pawn {
        &self.pawn
    }

    pub fn chart(&self) -> &ToothChart {
        &self.chart
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_finished(&self) -> bool {
        self.screen.is_terminal()
    }

    pub fn legal_range(&self) -> Vec<DieValue> {
        legal_range(self.pawn.position(), &self.board, &self.config)
    }

    /// Picks a legal value and applies it. `None` when the pawn cannot move or
    /// the board screen is not active.
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<MoveResult> {
        if self.screen != Screen::Board {
            log::warn!("Roll requested on {:?} screen", self.screen);
            return None;
        }
        let rolled = roll_die(&self.legal_range(), rng)?;
        Some(self.move_pawn(rolled, rng))
    }

    /// Applies a value the host rolled itself. Values outside the legal range
    /// are clamped by the movement rules. Only valid on the board screen.
    pub fn apply_roll<R: Rng + ?Sized>(
        &mut self,
        rolled: DieValue,
        rng: &mut R,
    ) -> Result<MoveResult> {
        self.expect_screen(Screen::Board)?;
        Ok(self.move_pawn(rolled, rng))
    }

    fn move_pawn<R: Rng + ?Sized>(&mut self, rolled: DieValue, rng: &mut R) -> MoveResult {
        let result = apply_roll(
            &mut self.pawn,
            rolled,
            &self.board,
            &mut self.chart,
            &mut self.ledger,
            &self.config,
            rng,
        );
        self.screen = result.next_screen;
        result
    }

    pub fn answer_quiz<R: Rng + ?Sized>(
        &mut self,
        kind: QuizKind,
        correct: u32,
        rng: &mut R,
    ) -> Result<QuizOutcome> {
        self.expect_screen(Screen::Quiz(kind))?;

        let outcome = resolve_quiz(
            &self.board,
            kind,
            correct,
            &mut self.chart,
            &mut self.ledger,
            &self.config,
            rng,
        );
        let landing = self.pawn.place(outcome.landing, &self.board);
        self.screen = self.board.screen_at(landing);
        Ok(outcome)
    }

    pub fn complete_gateway(&mut self, route: Route) -> Result<GatewayOutcome> {
        self.expect_screen(Screen::Gateway(route))?;

        let outcome = complete_gateway(route, self.board.gateway_rewards(), &mut self.ledger);
        self.screen = outcome.next_screen;
        Ok(outcome)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from_session(self)
    }

    fn expect_screen(&self, expected: Screen) -> Result<()> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(GameError::WrongScreen {
                expected,
                actual: self.screen,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn session() -> Session {
        let mut cells: Vec<BoardCell> = (0..12)
            .map(|index| BoardCell::new(index, CellKind::Normal))
            .collect();
        cells[2] = BoardCell::stop(2, Route::CariesQuiz);
        cells[4] = BoardCell::stop(4, Route::JobExperience);
        cells.push(BoardCell::new(12, CellKind::Goal));
        let quizzes = QuizTable {
            caries: QuizRule {
                threshold: 1,
                high: QuizBranch::new(5, 3),
                low: QuizBranch::new(-3, 1),
                stage_upgrade: StageUpgrade::OnPass,
            },
            gum: QuizRule {
                threshold: 1,
                high: QuizBranch::new(5, 12),
                low: QuizBranch::new(-3, 4),
                stage_upgrade: StageUpgrade::Never,
            },
        };
        let board = Board::new(cells, quizzes, GatewayRewards::default()).unwrap();
        Session::new(board, GameConfig::default())
    }

    #[test]
    fn starts_at_the_first_cell_with_starting_coins() {
        let session = session();

        assert_eq!(session.pawn().position(), 0);
        assert_eq!(session.ledger().coins(), 10);
        assert_eq!(session.chart().stage(), Stage::Child);
        assert_eq!(session.screen(), Screen::Board);
        assert_eq!(session.legal_range(), [1, 2]);
    }

    #[test]
    fn checkup_flow_ends_back_on_board() {
        let mut session = session();
        let mut rng = SmallRng::seed_from_u64(4);

        let result = session.apply_roll(2, &mut rng).unwrap();
        assert_eq!(result.next_screen, Screen::Gateway(Route::CariesQuiz));
        assert!(session.roll(&mut rng).is_none());
        assert!(session.answer_quiz(QuizKind::Caries, 1, &mut rng).is_err());

        let gateway = session.complete_gateway(Route::CariesQuiz).unwrap();
        assert_eq!(gateway.balance, 13);
        assert_eq!(session.screen(), Screen::Quiz(QuizKind::Caries));

        let quiz = session.answer_quiz(QuizKind::Caries, 3, &mut rng).unwrap();
        assert!(quiz.stage_upgraded);
        assert_eq!(session.pawn().position(), 3);
        assert_eq!(session.ledger().coins(), 18);
        assert_eq!(session.screen(), Screen::Board);
        assert_eq!(session.chart().stage(), Stage::Adult);
    }

    #[test]
    fn gateway_must_match_the_current_route() {
        let mut session = session();
        let mut rng = SmallRng::seed_from_u64(4);
        session.apply_roll(2, &mut rng).unwrap();

        assert_eq!(
            session.complete_gateway(Route::JobExperience),
            Err(GameError::WrongScreen {
                expected: Screen::Gateway(Route::JobExperience),
                actual: Screen::Gateway(Route::CariesQuiz),
            })
        );
    }

    #[test]
    fn quiz_landing_on_goal_finishes_the_session() {
        let mut session = session();
        session.screen = Screen::Quiz(QuizKind::Gum);

        session
            .answer_quiz(QuizKind::Gum, 1, &mut SmallRng::seed_from_u64(4))
            .unwrap();

        assert!(session.is_finished());
        assert_eq!(session.pawn().position(), 12);
    }

    #[test]
    fn quiz_landing_on_a_stop_cell_opens_its_gateway() {
        let mut session = session();
        let mut rng = SmallRng::seed_from_u64(4);
        session.screen = Screen::Quiz(QuizKind::Gum);

        let outcome = session.answer_quiz(QuizKind::Gum, 0, &mut rng).unwrap();

        assert_eq!(outcome.landing, 4);
        assert_eq!(session.screen(), Screen::Gateway(Route::JobExperience));
        assert!(session.roll(&mut rng).is_none());
        session.complete_gateway(Route::JobExperience).unwrap();
        assert_eq!(session.screen(), Screen::Board);
    }

    #[test]
    fn manual_roll_is_rejected_off_the_board_screen() {
        let mut session = session();
        let mut rng = SmallRng::seed_from_u64(4);
        session.apply_roll(2, &mut rng).unwrap();

        assert_eq!(
            session.apply_roll(1, &mut rng),
            Err(GameError::WrongScreen {
                expected: Screen::Board,
                actual: Screen::Gateway(Route::CariesQuiz),
            })
        );
        assert_eq!(session.pawn().position(), 2);
    }

    #[test]
    fn reset_restores_a_fresh_session() {
        let mut session = session();
        let fresh = session.clone();
        let mut rng = SmallRng::seed_from_u64(4);
        session.apply_roll(2, &mut rng).unwrap();
        session.complete_gateway(Route::CariesQuiz).unwrap();

        session.reset();

        assert_eq!(session, fresh);
    }

    #[test]
    fn config_is_clamped_on_creation() {
        let board = session().board().clone();
        let session = Session::new(board, GameConfig::new_unchecked(0, 0, 1));

        assert_eq!(session.config().max_die, 1);
        assert_eq!(session.config().max_redirect_hops, 1);
        assert_eq!(session.legal_range(), [1]);
    }
}
