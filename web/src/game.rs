use crate::board::{BoardView, CellMarks};
use crate::engine::HttpEngine;
use crate::settings::{self, Settings};
use crate::theme::Theme;
use crate::utils::*;
use clap::Args;
use gambit_core as game;
use game::{Difficulty, Phase};
use gloo::timers::callback::Interval;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Input(game::InputEvent),
    Completed(game::Ticket, Result<game::Reply, game::EngineError>),
    Tick,
    ChooseDifficulty(Difficulty),
    Start,
    Pause,
    Resume,
    Reset,
    Undo,
    Quit,
    DismissNotice,
    ToggleSettings,
    UpdateSettings(Settings),
    UpdateTheme(Theme),
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Base URL of the chess engine, same origin when empty
    #[arg(long, default_value = "")]
    pub engine_url: String,

    /// Difficulty preselected in the menu
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    pub difficulty: Difficulty,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::Session,
    engine: HttpEngine,
    settings: Settings,
    theme: Theme,
    difficulty: Difficulty,
    settings_open: bool,
    timer_interval: Option<Interval>,
}

impl GameView {
    fn dispatch(&self, ctx: &Context<Self>, request: game::Request) {
        log::debug!("dispatch {:?}", request.call);
        let engine = self.engine.clone();
        ctx.link().send_future(async move {
            let result = engine.execute(request.call).await;
            Msg::Completed(request.ticket, result)
        });
    }

    /// The interval only exists while the clock runs.
    fn sync_timer(&mut self, ctx: &Context<Self>) {
        let running = self.session.timer().is_running();
        match (running, self.timer_interval.is_some()) {
            (true, false) => {
                let link = ctx.link().clone();
                self.timer_interval = Some(Interval::new(game::GameTimer::TICK_MILLIS, move || {
                    link.send_message(Msg::Tick)
                }));
            }
            (false, true) => {
                self.timer_interval = None;
            }
            _ => {}
        }
    }

    fn phase_class(&self) -> &'static str {
        match self.session.phase() {
            Phase::PreGame => "pre-game",
            Phase::Active if self.session.is_pending() => "thinking",
            Phase::Active => "in-progress",
            Phase::Paused => "paused",
            Phase::GameOver => "game-over",
        }
    }

    fn view_menu(&self, ctx: &Context<Self>) -> Html {
        let starting = self.session.is_pending();
        let busy = starting || self.session.is_quitting();
        html! {
            <section class="menu">
                <h1>{"Chess"}</h1>
                <fieldset>
                    <legend>{"Difficulty"}</legend>
                    {
                        for Difficulty::ALL.into_iter().map(|difficulty| html! {
                            <label>
                                <input
                                    type="radio"
                                    name="difficulty"
                                    checked={difficulty == self.difficulty}
                                    onclick={ctx.link().callback(move |_| Msg::ChooseDifficulty(difficulty))}
                                />
                                {difficulty.as_str()}
                            </label>
                        })
                    }
                </fieldset>
                <button disabled={busy} onclick={ctx.link().callback(|_| Msg::Start)}>
                    {if starting { "Starting…" } else { "Play" }}
                </button>
            </section>
        }
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let Some(board) = self.session.board() else {
            return html! { <div class="board-error">{"No board received from the engine"}</div> };
        };
        match game::Grid::render(board, self.session.orientation()) {
            Ok(grid) => html! {
                <BoardView
                    {grid}
                    marks={CellMarks::for_session(&self.session)}
                    show_coordinates={self.settings.show_coordinates}
                    interactive={self.session.accepts_input()}
                    dragging={self.session.input().is_dragging()}
                    callback={ctx.link().callback(Msg::Input)}
                />
            },
            Err(err) => {
                log::error!("cannot render board: {}", err);
                html! { <div class="board-error">{format!("Cannot show the board: {}", err)}</div> }
            }
        }
    }

    fn view_status(&self) -> Html {
        let status = self.session.status();
        let text = match (self.session.phase(), status) {
            (Phase::Paused, _) => "Paused".to_string(),
            (_, Some(status)) => status.text.clone(),
            (_, None) => String::new(),
        };
        let category = status.map(|status| format!("{:?}", status.category).to_lowercase());
        let last_move = self.session.history().last_move();

        html! {
            <nav>
                <aside class={classes!("status", category)}>{text}</aside>
                <span class="last-move">{last_move.unwrap_or_default()}</span>
                <aside class="clock">{game::format_clock(self.session.timer().elapsed_secs())}</aside>
            </nav>
        }
    }

    fn view_controls(&self, ctx: &Context<Self>) -> Html {
        let phase = self.session.phase();
        let idle = !self.session.is_pending();
        let can_undo = idle
            && matches!(phase, Phase::Active | Phase::GameOver)
            && !self.session.history().is_empty();

        html! {
            <footer class="controls">
                if matches!(phase, Phase::Paused) {
                    <button onclick={ctx.link().callback(|_| Msg::Resume)}>{"Resume"}</button>
                } else {
                    <button disabled={!matches!(phase, Phase::Active)} onclick={ctx.link().callback(|_| Msg::Pause)}>{"Pause"}</button>
                }
                <button disabled={!can_undo} onclick={ctx.link().callback(|_| Msg::Undo)}>{"Undo"}</button>
                <button
                    disabled={!matches!(phase, Phase::Active | Phase::GameOver)}
                    onclick={ctx.link().callback(|_| Msg::Reset)}
                >
                    {"New game"}
                </button>
                <button onclick={ctx.link().callback(|_| Msg::Quit)}>{"Menu"}</button>
            </footer>
        }
    }

    fn view_history(&self) -> Html {
        html! {
            <ol class="history">
                {
                    for self.session.history().entries().iter().map(|entry| html! {
                        <li>{entry.to_string()}</li>
                    })
                }
            </ol>
        }
    }

    fn view_overlay(&self, ctx: &Context<Self>) -> Html {
        match self.session.phase() {
            Phase::Paused => html! {
                <dialog class="pause" open={true}>
                    <article>
                        <h2>{"Paused"}</h2>
                        <footer>
                            <button onclick={ctx.link().callback(|_| Msg::Resume)}>{"Resume"}</button>
                            <button onclick={ctx.link().callback(|_| Msg::Quit)}>{"Quit to menu"}</button>
                        </footer>
                    </article>
                </dialog>
            },
            Phase::GameOver => {
                let text = self
                    .session
                    .status()
                    .map(|status| status.text.clone())
                    .unwrap_or_else(|| "Game over".to_string());
                html! {
                    <dialog class="game-over" open={true}>
                        <article>
                            <h2>{text}</h2>
                            <p>{format!("Time: {}", game::format_clock(self.session.timer().elapsed_secs()))}</p>
                            <footer>
                                <button onclick={ctx.link().callback(|_| Msg::Reset)}>{"Play again"}</button>
                                <button onclick={ctx.link().callback(|_| Msg::Undo)}>{"Take back"}</button>
                                <button onclick={ctx.link().callback(|_| Msg::Quit)}>{"Menu"}</button>
                            </footer>
                        </article>
                    </dialog>
                }
            }
            Phase::PreGame | Phase::Active => html! {},
        }
    }

    fn view_notice(&self, ctx: &Context<Self>) -> Html {
        let Some(notice) = self.session.notice() else {
            return html! {};
        };
        let kind = match notice.kind {
            game::NoticeKind::Rejected => "rejected",
            game::NoticeKind::Transport => "transport",
            game::NoticeKind::Integrity => "integrity",
        };
        html! {
            <div class={classes!("notice", kind)} role="alert">
                <span>{notice.message.clone()}</span>
                <button onclick={ctx.link().callback(|_| Msg::DismissNotice)}>{"×"}</button>
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let settings: Settings = LocalOrDefault::local_or_default();
        log::debug!("engine at {:?}", props.engine_url);
        Self {
            session: game::Session::new(settings.orientation),
            engine: HttpEngine::new(&props.engine_url),
            settings,
            theme: LocalOrDefault::local_or_default(),
            difficulty: props.difficulty,
            settings_open: false,
            timer_interval: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let mut request = None;
        let updated = match msg {
            Input(event) => {
                log::trace!("input: {:?}", event);
                request = self.session.handle_input(event);
                true
            }
            Completed(ticket, result) => self.session.complete(ticket, result),
            Tick => self.session.tick(),
            ChooseDifficulty(difficulty) => {
                let changed = self.difficulty != difficulty;
                self.difficulty = difficulty;
                changed
            }
            Start => {
                request = self.session.start(self.difficulty);
                request.is_some()
            }
            Pause => self.session.pause(),
            Resume => self.session.resume(),
            Reset => {
                request = self.session.reset();
                request.is_some()
            }
            Undo => {
                request = self.session.undo();
                request.is_some()
            }
            Quit => {
                request = Some(self.session.quit());
                true
            }
            DismissNotice => self.session.dismiss_notice(),
            ToggleSettings => {
                self.settings_open = !self.settings_open;
                true
            }
            UpdateSettings(settings) => {
                if self.settings != settings {
                    self.session.set_orientation(settings.orientation);
                    settings.local_save();
                    self.settings = settings;
                    true
                } else {
                    false
                }
            }
            UpdateTheme(theme) => {
                theme.apply();
                let changed = self.theme != theme;
                self.theme = theme;
                changed
            }
        };

        if let Some(request) = request {
            self.dispatch(ctx, request);
        }
        self.sync_timer(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use settings::SettingsView;

        let cb_show_settings = ctx.link().callback(|_| Msg::ToggleSettings);

        html! {
            <div class={classes!("gambit", self.phase_class())}>
                <small onclick={cb_show_settings}>{"···"}</small>
                {self.view_notice(ctx)}
                if matches!(self.session.phase(), Phase::PreGame) {
                    {self.view_menu(ctx)}
                } else {
                    <>
                        {self.view_status()}
                        {self.view_board(ctx)}
                        {self.view_controls(ctx)}
                        {self.view_history()}
                        {self.view_overlay(ctx)}
                    </>
                }
                <Modal>
                    <SettingsView
                        open={self.settings_open}
                        settings={self.settings.clone()}
                        theme={self.theme}
                        on_change={ctx.link().callback(Msg::UpdateSettings)}
                        on_theme={ctx.link().callback(Msg::UpdateTheme)}
                        on_close={ctx.link().callback(|_| Msg::ToggleSettings)}
                    />
                </Modal>
            </div>
        }
    }
}
