use serenity::all::{CreateEmbed, CreateEmbedFooter, User};
use thousands::Separable;

use super::pagination::Page;
use super::{format_duration_opt, ACCENT_COLOR};
use crate::player::{RepeatMode, Track};

/// Embed for the now-playing control message.
pub fn now_playing_panel(track: &Track, repeat: RepeatMode) -> CreateEmbed {
    let views = track.views.unwrap_or(0).separate_with_commas();
    let likes = track.likes.unwrap_or(0).separate_with_commas();

    let mut embed = CreateEmbed::new()
        .color(ACCENT_COLOR)
        .title("🎶 Ahora Reproduciendo")
        .description(format!("**[{}]({})**", track.title, track.url))
        .field("Duración", format_duration_opt(track.duration), true)
        .field("Solicitado por", track.requested_by.clone(), true)
        .field("Modo de Repetición", repeat.panel_label(), true)
        .footer(CreateEmbedFooter::new(format!(
            "Vistas: {} | Likes: {}",
            views, likes
        )));

    if let Some(thumbnail) = &track.thumbnail {
        embed = embed.thumbnail(thumbnail.clone());
    }

    embed
}

/// Embed for one page of the queue view, entries numbered by their absolute
/// queue position.
pub fn queue_page(view: &Page<'_, Track>) -> CreateEmbed {
    let description = view
        .items
        .iter()
        .enumerate()
        .map(|(i, track)| {
            format!(
                "**{}.** 🎶 **{}** - `{}`",
                view.offset + i + 1,
                track.title,
                format_duration_opt(track.duration)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    CreateEmbed::new()
        .color(ACCENT_COLOR)
        .title("🎵 Cola de canciones")
        .description(description)
        .footer(CreateEmbedFooter::new(format!(
            "Página {} de {}",
            view.page + 1,
            view.total_pages
        )))
}

/// Help card listing the text commands.
pub fn help(prefix: &str) -> CreateEmbed {
    CreateEmbed::new()
        .color(ACCENT_COLOR)
        .title("🎶 Comandos del Bot de Música")
        .description("Usa los siguientes comandos para controlar el bot de música:")
        .field(
            "▶️ **Reproducir Canción**",
            format!("`{prefix}play <nombre o enlace>` o `{prefix}p` - Reproduce una canción o la añade a la cola si ya hay canciones en reproducción."),
            false,
        )
        .field(
            "🔀 **Mezclar Cola**",
            format!("`{prefix}shuffle` o `{prefix}sh` - Mezcla aleatoriamente las canciones en la cola."),
            false,
        )
        .field(
            "⏸️ **Pausar Canción**",
            format!("`{prefix}pause` o `{prefix}pa` - Pausa la canción actual en reproducción."),
            false,
        )
        .field(
            "⏯️ **Reanudar Canción**",
            format!("`{prefix}resume` o `{prefix}r` - Reanuda la canción pausada."),
            false,
        )
        .field(
            "⏭️ **Saltar Canción**",
            format!("`{prefix}skip` o `{prefix}s` - Salta a la siguiente canción en la cola."),
            false,
        )
        .field(
            "📜 **Mostrar Cola**",
            format!("`{prefix}showQueue` o `{prefix}q` - Muestra la cola de canciones actual."),
            false,
        )
        .field(
            "🛑 **Detener Reproducción**",
            format!("`{prefix}stop` o `{prefix}st` - Detiene la reproducción y saca al bot del canal de voz."),
            false,
        )
        .field(
            "🔁 **Modo Loop**",
            format!("`{prefix}loop <off|song|queue>` o `{prefix}l` - Establece el modo de repetición."),
            false,
        )
        .field(
            "🗑️ **Eliminar Canción de la Cola**",
            format!("`{prefix}remove <número>` o `{prefix}rm` - Elimina la canción en la posición especificada de la cola."),
            false,
        )
        .field(
            "❓ **Ayuda**",
            format!("`{prefix}help` o `{prefix}h` - Muestra este mensaje de ayuda."),
            false,
        )
        .footer(CreateEmbedFooter::new(
            "Usa estos comandos para disfrutar de la música en tu servidor.",
        ))
}

/// Profile image of the target user with a direct link.
pub fn avatar(user: &User) -> CreateEmbed {
    let face = user.face();

    CreateEmbed::new()
        .color(ACCENT_COLOR)
        .title(format!("Avatar de {}", user.display_name()))
        .description(format!("[Enlace directo]({face})"))
        .image(face)
}
