use bitflags::bitflags;
use gambit_core as game;
use yew::prelude::*;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub(crate) struct CellMarks: u8 {
        const SELECTED    = 1;
        const HIGHLIGHTED = 1 << 1;
        const FOCUSED     = 1 << 2;
        const HOVERED     = 1 << 3;
        const MOVING      = 1 << 4;
    }
}

impl CellMarks {
    /// Per-square decoration, indexed by square id.
    pub(crate) fn for_session(session: &game::Session) -> [Self; game::Square::COUNT as usize] {
        let mut marks = [Self::empty(); game::Square::COUNT as usize];
        let mut mark = |square: game::Square, flag: Self| marks[square.id() as usize] |= flag;

        let selection = session.selection();
        if let Some(square) = selection.selected() {
            mark(square, Self::SELECTED);
        }
        for &square in selection.highlighted() {
            mark(square, Self::HIGHLIGHTED);
        }
        if let Some(square) = session.input().cursor() {
            mark(square, Self::FOCUSED);
        }
        if let Some(square) = session.input().hover() {
            mark(square, Self::HOVERED);
        }
        if let Some(intent) = session.in_flight() {
            mark(intent.from(), Self::MOVING);
            mark(intent.to(), Self::MOVING);
        }
        marks
    }

    fn classes(self) -> Classes {
        let mut class = classes!();
        for (name, flag) in [
            ("selected", Self::SELECTED),
            ("target", Self::HIGHLIGHTED),
            ("focus", Self::FOCUSED),
            ("hover", Self::HOVERED),
            ("moving", Self::MOVING),
        ] {
            if self.contains(flag) {
                class.push(name);
            }
        }
        class
    }
}

pub(crate) fn piece_asset(piece: game::Piece) -> String {
    format!(
        "/static/pieces/{}pieces/{}.png",
        piece.side.prefix(),
        piece.symbol()
    )
}

fn square_under_touch(e: &TouchEvent) -> Option<game::Square> {
    let touch = e.changed_touches().item(0)?;
    let element = gloo::utils::document()
        .element_from_point(touch.client_x() as f32, touch.client_y() as f32)?;
    let cell = element.closest("[data-sq]").ok().flatten()?;
    cell.get_attribute("data-sq")?.parse().ok().and_then(game::Square::new)
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    cell: game::GridCell,
    marks: CellMarks,
    #[prop_or_default]
    file_label: bool,
    #[prop_or_default]
    rank_label: bool,
    callback: Callback<game::InputEvent>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use game::InputEvent::*;

    let CellProps {
        cell,
        marks,
        file_label,
        rank_label,
        callback,
    } = props.clone();
    let square = cell.square;

    let class = classes!("cell", cell.shade.class(), marks.classes());

    let onclick = callback.reform(move |_: MouseEvent| Click(square));

    let ondragstart = {
        let callback = callback.clone();
        Callback::from(move |e: DragEvent| {
            if let Some(data) = e.data_transfer() {
                // Firefox refuses to start a drag without a payload
                if let Err(err) = data.set_data("text/plain", &square.to_string()) {
                    log::warn!("drag payload: {:?}", err);
                }
            }
            log::trace!("{} drag start", square);
            callback.emit(DragStart(square));
        })
    };

    let ondragover = Callback::from(|e: DragEvent| e.prevent_default());

    let ondrop = {
        let callback = callback.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            log::trace!("{} drop", square);
            callback.emit(Drop(square));
        })
    };

    let ondragend = callback.reform(|_: DragEvent| DragEnd);

    let ontouchstart = callback.reform(move |_: TouchEvent| TouchStart(square));

    let ontouchmove = callback.reform(|e: TouchEvent| TouchMove(square_under_touch(&e)));

    let ontouchend = {
        let callback = callback.clone();
        Callback::from(move |e: TouchEvent| {
            // keeps the browser from synthesizing a click after the tap
            e.prevent_default();
            let target = square_under_touch(&e);
            log::trace!("{} touch end over {:?}", square, target);
            callback.emit(TouchEnd(target));
        })
    };

    let ontouchcancel = callback.reform(|_: TouchEvent| TouchCancel);

    html! {
        <div {class} data-sq={square.id().to_string()}
            {onclick} {ondragstart} {ondragover} {ondrop} {ondragend}
            {ontouchstart} {ontouchmove} {ontouchend} {ontouchcancel}>
            if let Some(piece) = cell.piece {
                <img class="piece" src={piece_asset(piece)} alt={piece.symbol().to_string()} draggable="true"/>
            }
            if rank_label {
                <span class="rank">{(square.rank() + 1).to_string()}</span>
            }
            if file_label {
                <span class="file">{char::from(b'a' + square.file()).to_string()}</span>
            }
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct BoardProps {
    pub grid: game::Grid,
    pub marks: [CellMarks; game::Square::COUNT as usize],
    #[prop_or_default]
    pub show_coordinates: bool,
    #[prop_or_default]
    pub interactive: bool,
    #[prop_or_default]
    pub dragging: bool,
    pub callback: Callback<game::InputEvent>,
}

#[function_component(BoardView)]
pub(crate) fn board_component(props: &BoardProps) -> Html {
    let BoardProps {
        grid,
        marks,
        show_coordinates,
        interactive,
        dragging,
        callback,
    } = props;

    let onkeydown = {
        let callback = callback.clone();
        Callback::from(move |e: KeyboardEvent| {
            if let Some(key) = game::NavKey::from_key(&e.key()) {
                e.prevent_default();
                callback.emit(game::InputEvent::Key(key));
            }
        })
    };

    let last_row = game::Grid::WIDTH - 1;

    html! {
        <div class={classes!("board", interactive.then_some("playable"), dragging.then_some("dragging"))} tabindex="0" {onkeydown}>
            {
                for grid.rows().enumerate().map(|(row, cells)| html! {
                    <div class="rank-row">
                        {
                            for cells.iter().enumerate().map(|(col, &cell)| html! {
                                <CellView
                                    {cell}
                                    marks={marks[cell.square.id() as usize]}
                                    file_label={*show_coordinates && row == last_row}
                                    rank_label={*show_coordinates && col == 0}
                                    callback={callback.clone()}
                                />
                            })
                        }
                    </div>
                })
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_assets_follow_side_folders() {
        let white_knight = game::Piece::from_symbol('N').unwrap();
        let black_queen = game::Piece::from_symbol('q').unwrap();
        assert_eq!(piece_asset(white_knight), "/static/pieces/wpieces/N.png");
        assert_eq!(piece_asset(black_queen), "/static/pieces/bpieces/q.png");
    }

    #[test]
    fn fresh_session_has_no_marks() {
        let session = game::Session::new(game::Orientation::White);
        let marks = CellMarks::for_session(&session);
        assert!(marks.iter().all(|m| m.is_empty()));
    }

    #[test]
    fn marks_map_to_css_classes() {
        let marks = CellMarks::SELECTED | CellMarks::HOVERED;
        let classes = marks.classes();
        assert!(classes.contains("selected"));
        assert!(classes.contains("hover"));
        assert!(!classes.contains("target"));
    }
}
