use crate::theme::Theme;
use crate::utils::*;
use chrono::prelude::*;
use gloo::timers::callback::{Interval, Timeout};
use pexeso_core as game;
use pexeso_core::DeckShuffler;
use yew::prelude::*;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap()
}

/// Display colors a card's matching value maps to. The core never sees these.
const PALETTE: [&str; 6] = ["red", "blue", "green", "yellow", "purple", "orange"];

fn card_color(value: game::PairId) -> &'static str {
    PALETTE[(value as usize) % PALETTE.len()]
}

fn card_classes(face: game::CardFace, locked: bool) -> Classes {
    let mut class = classes!(
        "card",
        match face {
            game::CardFace::Down => classes!(),
            game::CardFace::Up => classes!("flip"),
            game::CardFace::Matched => classes!("flip", "correct"),
        }
    );
    if locked {
        class.push("locked");
    }
    class
}

impl StorageKey for game::BestTimeRecord {
    const KEY: &'static str = "best-time";
}

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::FlipOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::FlipOutcome| outcome.has_update())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CardClicked(game::SlotIndex),
    FlipBack(game::FlipBackToken),
    UpdateTime,
    NewGame,
    CycleTheme,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    slot: game::SlotIndex,
    card: game::CardDefinition,
    face: game::CardFace,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::SlotIndex>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        slot,
        card,
        face,
        locked,
        callback,
    } = props.clone();

    let class = card_classes(face, locked);
    let color = card_color(card.value);

    let onclick = Callback::from(move |_: MouseEvent| {
        callback.emit(slot);
        log::trace!("card {} clicked", slot);
    });

    html! {
        <div {class} data-value={color} {onclick}>
            <div class="card-front"/>
            <div class="card-back"/>
        </div>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a layout seed instead of a random one
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    game: Option<game::Game>,
    best_time: game::BestTimeRecord,
    theme: Theme,
    seed: u64,
    prev_time: game::Seconds,
    pending_flip_back: Option<Timeout>,
    _timer_interval: Interval,
}

impl GameView {
    fn start_game(&mut self, ctx: &Context<Self>) {
        self.seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        // dropping the handle cancels a flip-back still in flight
        self.pending_flip_back = None;
        let deck = game::Deck::with_pair_count(game::DeckConfig::classic().pairs);
        let layout = game::RandomShuffler::new(self.seed).shuffle(&deck);
        self.game = Some(game::Game::new(layout, utc_now()));
        self.prev_time = 0;
        log::debug!("New game with seed {}", self.seed);
    }

    fn on_card_clicked(&mut self, ctx: &Context<Self>, slot: game::SlotIndex) -> bool {
        let now = utc_now();
        let Some(game) = self.game.as_mut() else {
            return false;
        };

        let outcome = game.flip(slot, now);
        let elapsed = game.elapsed_secs(now);
        match outcome {
            Ok(game::FlipOutcome::Mismatch(token)) => {
                self.pending_flip_back = Some(Self::create_flip_back_timer(ctx, token));
            }
            Ok(game::FlipOutcome::Won) => {
                log::debug!("won in {}s", elapsed);
                self.record_finish(elapsed);
            }
            _ => {}
        }
        outcome.has_update()
    }

    fn record_finish(&mut self, finished_in: game::Seconds) {
        if self.best_time.challenge(finished_in).is_record() {
            self.best_time.local_save();
        }
    }

    fn get_time(&self) -> game::Seconds {
        self.game
            .as_ref()
            .map(|g| g.elapsed_secs(utc_now()))
            .unwrap_or(0)
    }

    fn get_pairs_left(&self) -> i32 {
        self.game
            .as_ref()
            .map(|g| g.pairs_left() as i32)
            .unwrap_or(game::DeckConfig::classic().pairs as i32)
    }

    fn get_game_state_class(&self) -> Classes {
        classes!(match self.game.as_ref().map(|game| game.state()) {
            None => "not-started",
            Some(game::GameState::InProgress) => "in-progress",
            Some(game::GameState::Won) => "win",
        })
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(500, move || link.send_message(Msg::UpdateTime))
    }

    fn create_flip_back_timer(ctx: &Context<Self>, token: game::FlipBackToken) -> Timeout {
        let link = ctx.link().clone();
        Timeout::new(game::FLIP_BACK_DELAY_MS, move || {
            link.send_message(Msg::FlipBack(token))
        })
    }

    fn view_start(&self, ctx: &Context<Self>) -> Html {
        if self.game.is_some() {
            return Html::default();
        }

        let onclick = ctx.link().callback(|_| Msg::NewGame);
        html! {
            <button id="start-button" {onclick}>{"Start Game"}</button>
        }
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let class = classes!("board", self.game.is_some().then_some("show"));
        let total = self.game.as_ref().map_or(0, |game| game.total_cards());

        html! {
            <section {class}>
                {
                    for (0..total).filter_map(|slot| {
                        let game = self.game.as_ref()?;
                        let slot = game::SlotIndex::try_from(slot).ok()?;
                        let card = game.card_at(slot);
                        let face = game.face_at(slot);
                        let locked = !game.can_flip(slot);
                        let callback = ctx.link().callback(Msg::CardClicked);
                        Some(html! {
                            <CardView {slot} {card} {face} {locked} {callback}/>
                        })
                    })
                }
            </section>
        }
    }

    fn view_results(&self, ctx: &Context<Self>) -> Html {
        let Some(game) = self.game.as_ref().filter(|game| game.is_won()) else {
            return Html::default();
        };

        let elapsed = game.elapsed_secs(utc_now());
        let best = self.best_time.best().unwrap_or(elapsed);
        let onclick = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        html! {
            <footer class="results">
                <output id="time">{format!("Time: {} seconds", elapsed)}</output>
                <output id="best-time">{format!("Best Time: {} seconds", best)}</output>
                <button id="restart-button" class="show" {onclick}>{"Play Again"}</button>
            </footer>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let theme = Theme::local_or_default();
        theme.apply();

        Self {
            game: None,
            best_time: LocalOrDefault::local_or_default(),
            theme,
            seed: ctx.props().seed.unwrap_or_else(js_random_seed),
            prev_time: 0,
            pending_flip_back: None,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CardClicked(slot) => self.on_card_clicked(ctx, slot),
            FlipBack(token) => {
                self.pending_flip_back = None;
                self.game
                    .as_mut()
                    .map_or(false, |game| game.flip_back(token).has_update())
            }
            UpdateTime => {
                let time = self.get_time();
                if self.prev_time != time {
                    self.prev_time = time;
                    true
                } else {
                    false
                }
            }
            NewGame => {
                self.start_game(ctx);
                true
            }
            CycleTheme => {
                self.theme = self.theme.cycle();
                self.theme.apply();
                self.theme.local_save();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let pairs_left = format_for_counter(self.get_pairs_left());
        let elapsed_time = format_for_counter(self.get_time() as i32);
        let game_state_class = self.get_game_state_class();

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_cycle_theme = ctx.link().callback(|_| CycleTheme);

        html! {
            <div class="pexeso">
                <small onclick={cb_cycle_theme}>{self.theme.label()}</small>
                <nav>
                    <aside>{pairs_left}</aside>
                    <span><button class={game_state_class} onclick={cb_new_game}/></span>
                    <aside>{elapsed_time}</aside>
                </nav>
                { self.view_start(ctx) }
                { self.view_board(ctx) }
                { self.view_results(ctx) }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_time_lives_under_the_legacy_key() {
        assert_eq!(<game::BestTimeRecord as StorageKey>::KEY, "best-time");
    }

    #[test]
    fn card_classes_follow_the_face() {
        let down = card_classes(game::CardFace::Down, false);
        let up = card_classes(game::CardFace::Up, false);
        let matched = card_classes(game::CardFace::Matched, false);

        assert!(down.contains("card"));
        assert!(!down.contains("flip"));
        assert!(up.contains("flip"));
        assert!(!up.contains("correct"));
        assert!(matched.contains("flip"));
        assert!(matched.contains("correct"));
    }

    #[test]
    fn locked_cards_are_marked() {
        let locked = card_classes(game::CardFace::Down, true);

        assert!(locked.contains("locked"));
        assert!(!card_classes(game::CardFace::Down, false).contains("locked"));
    }

    #[test]
    fn palette_wraps_around_large_values() {
        assert_eq!(card_color(0), "red");
        assert_eq!(card_color(5), "orange");
        assert_eq!(card_color(6), "red");
    }

    #[test]
    fn rejected_flips_are_silent() {
        let err: game::Result<game::FlipOutcome> = Err(game::GameError::InvalidSlot);

        assert!(!err.has_update());
    }
}
