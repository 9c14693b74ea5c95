use serenity::all::{ButtonStyle, CreateActionRow, CreateButton};

/// Component ids attached to the control and pagination messages. The
/// component router matches on these exact strings.
pub mod ids {
    pub const PAUSE: &str = "pause";
    pub const RESUME: &str = "resume";
    pub const SKIP: &str = "skip";
    pub const LOOP: &str = "loop";
    pub const SHOW_QUEUE: &str = "showQueue";
    pub const STOP: &str = "stop";
    pub const PREV_PAGE: &str = "prevPage";
    pub const NEXT_PAGE: &str = "nextPage";
}

/// Button rows for the now-playing control message.
pub fn control_rows() -> Vec<CreateActionRow> {
    let pause = CreateButton::new(ids::PAUSE)
        .label("⏸️ Pausar")
        .style(ButtonStyle::Primary);

    let resume = CreateButton::new(ids::RESUME)
        .label("▶️ Reanudar")
        .style(ButtonStyle::Success);

    let skip = CreateButton::new(ids::SKIP)
        .label("⏭️ Saltar")
        .style(ButtonStyle::Secondary);

    let loop_mode = CreateButton::new(ids::LOOP)
        .label("🔁 Loop")
        .style(ButtonStyle::Secondary);

    let show_queue = CreateButton::new(ids::SHOW_QUEUE)
        .label("🎵 Mostrar Cola")
        .style(ButtonStyle::Primary);

    let stop = CreateButton::new(ids::STOP)
        .label("⏹️ Detener")
        .style(ButtonStyle::Danger);

    vec![
        CreateActionRow::Buttons(vec![pause, resume, skip, loop_mode, show_queue]),
        CreateActionRow::Buttons(vec![stop]),
    ]
}

/// Pagination row for the queue view, with the boundary button disabled.
pub fn pagination_row(page: usize, total_pages: usize) -> CreateActionRow {
    let prev = CreateButton::new(ids::PREV_PAGE)
        .label("⬅️ Anterior")
        .style(ButtonStyle::Primary)
        .disabled(page == 0);

    let next = CreateButton::new(ids::NEXT_PAGE)
        .label("➡️ Siguiente")
        .style(ButtonStyle::Primary)
        .disabled(page + 1 >= total_pages);

    CreateActionRow::Buttons(vec![prev, next])
}
