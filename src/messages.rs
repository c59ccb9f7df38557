//! User-facing (Italian) texts, written in Telegram MarkdownV2.
//!
//! Dynamic values must go through [`escape_markdown`] (inline text) or
//! [`escape_code`] (inside code blocks) before being substituted.

use crate::state::game::GameMode;

/// Characters with a special meaning in MarkdownV2 inline text.
const MARKDOWN_SPECIAL: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    '\\',
];

/// Reply to `/via`.
pub const WELCOME: &str = "\
*Benvenuti su __IndovinaTi__\\!* \u{1F44D}

_Il gioco social del CoNatale_\\.

Per giocare: crea un nuovo gruppo con questo bot e tutti gli amici con cui vuoi giocare\\.

Clicca poi su /aiuto per vedere come si gioca\\.
";

/// Game rules, reply to `/aiuto`.
pub const HELP: &str = "\
Ci sono un sacco di /parole pronte per essere indovinate\\.

Sono disponibili diverse modalità di gioco:
\\- /gioco1: indovina la parola che ti verrà assegnata facendo domande agli altri giocatori\\.
\\- /gioco2: indovina le parole assegnate agli altri giocatori facendo loro delle domande\\.

In ogni modalità, ogni partecipante vedrà solo le parole che non deve indovinare ma che gli serviranno per rispondere alle domande degli altri partecipanti\\.

Per indovinare una parola invece, ogni partecipante può fare solo domande a cui si possa rispondere con un SI o NO\\.

Per poter giocare servono almeno 2 /giocatori\\.

Se anche tu vuoi giocare, basta cliccare su /partecipa\\.

Successivamente, apri la chat privata con il bot e \\(se è la prima volta che lo usi\\) abilitalo cliccando sul bottone `AVVIA` che compare in fondo alla chat\\.

Nella chat privata riceverai le istruzioni all'inizio di ogni nuova partita, che ogni partecipante può avviare selezionando una delle modalità di gioco sopra riportate\\.
";

/// Fallback for anything that is not a known command.
pub const COMMAND_NOT_FOUND: &str = "\
*Errore: comando non valido\\!*

Clicca /aiuto per un elenco dei comandi supportati\\.
";

/// Reply to game commands sent outside a group chat.
pub const GROUP_ONLY: &str = "*Errore:* comando disponibile solo da una chat di gruppo\\!";

/// Reply to `/riavvia`.
pub const REGISTRATIONS_OPEN: &str = "Nuovo gioco: *iscrizioni aperte\\!*";

/// Broadcast to the group once every player got their notes.
pub const ROUND_STARTED: &str = "\
Tutti i partecipanti sono stati notificati: per vedere quali parole sono state assegnate vai alla chat privata con il bot\\.

*Iniziamo con le domande\\!*
";

/// Reply to `/gioco1` and `/gioco2` with fewer than two players enrolled.
pub const NOT_ENOUGH_PLAYERS: &str = "Servono almeno due partecipanti per poter giocare";

/// Reply when notes are requested outside a running round.
pub const NO_ACTIVE_ROUND: &str = "Nessuna partita in corso: avviane una con /gioco1 o /gioco2";

/// Reply for failures that are not the user's fault.
pub const INTERNAL_ERROR: &str = "*Errore interno\\!* Riprova più tardi\\.";

/// Escape `text` for MarkdownV2 inline content.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if MARKDOWN_SPECIAL.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Escape `text` for use inside a MarkdownV2 code block.
pub fn escape_code(text: &str) -> String {
    text.replace('\\', "\\\\").replace('`', "\\`")
}

/// Catalog stats wrapped in a code block.
pub fn words_report(stats_report: &str) -> String {
    format!(
        "Parole caricate per ciascuna categoria:\n```\n{}\n```",
        escape_code(stats_report)
    )
}

/// Roster summary reply.
pub fn players_report(summary: &str) -> String {
    format!("Partecipanti:\n   {}", escape_markdown(summary))
}

/// Confirmation sent to the group when someone enrolls.
pub fn enrolled(name: &str) -> String {
    format!("Ottimo *{}* vuole giocare con noi\\!", escape_markdown(name))
}

/// Reply to a repeated enrollment.
pub fn already_enrolled(name: &str) -> String {
    format!("*{}* partecipa già al gioco\\!", escape_markdown(name))
}

/// Reply when the catalog cannot serve every player.
pub fn insufficient_words(available: usize, required: usize) -> String {
    format!(
        "Non ci sono abbastanza parole: ne restano {available} ma ne servono {required}\\. \
         Usa /riavvia per ricominciare\\."
    )
}

/// Private notes for one player; `lines` are already formatted (not escaped).
pub fn round_notes(mode: GameMode, chat_label: &str, round: u32, lines: &[String]) -> String {
    let chat = escape_markdown(chat_label);
    let lines = lines
        .iter()
        .map(|line| format!(" - {}", escape_code(line)))
        .collect::<Vec<_>>()
        .join("\n");

    match mode {
        GameMode::GuessWhoYouAre => format!(
            "*\\.:: {chat}* \\(Partita Nr\\.{round}\\)

Gioco: *Indovina chi sei*

Ad ogni partecipante è assegnata una parola che dovrà indovinare facendo delle domande alle quali è possibile rispondere solo con SI o NO\\.

Anche tu hai una parola assegnata, ma ovviamente non la sai\\.\\.\\. altrimenti non sarebbe divertente no\\? :\\)

Ecco le parole assegnate agli altri partecipanti a questa partita:

```
{lines}
```
"
        ),
        GameMode::HiddenWord => format!(
            "*\\.:: {chat}* \\(Partita Nr\\.{round}\\)

Gioco: *Parola nascosta*

Ogni partecipante a turno può farti una domanda per cercare di indovinare la parola nascosta che solo tu sai\\.

La parola nascosta che ti è stata assegnata è:

```
{lines}
```
"
        ),
    }
}
