//! Color key registry
//!
//! Every themeable role is a [`ColorKey`] variant. The registry below is the
//! single place that assigns each key its wire name, its built-in default,
//! the group it belongs to and, optionally, the key it falls back to when an
//! overlay has no explicit entry.
//!
//! A handful of keys carry non-color payloads through the color maps (the
//! wallpaper gradient rotation in degrees and the animated-gradient flag as
//! `0`/`1`). They are grouped under [`KeyGroup::Value`] so no color pass ever
//! touches them.

use crate::color::Color;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a key name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    /// No registry entry has this name
    #[error("Unknown color key: {0}")]
    Unknown(String),
}

/// Which subsystem a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyGroup {
    /// General chrome and chat colors, recolored by the accent
    General,
    /// Outgoing message colors, recolored by the outgoing accent
    MyMessages,
    /// Avatar placeholder backgrounds
    Avatar,
    /// Statistics chart lines
    Chart,
    /// Voice and video call UI
    Calls,
    /// Non-color payloads stored in the color maps
    Value,
}

impl KeyGroup {
    /// Groups that an accent change must never recolor
    pub const fn is_accent_excluded(self) -> bool {
        matches!(self, KeyGroup::Avatar | KeyGroup::Chart | KeyGroup::Calls | KeyGroup::Value)
    }
}

macro_rules! color_keys {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident = $name:literal, $default:literal, $group:ident $(, fallback = $fallback:ident)?;
        )*
    ) => {
        /// Symbolic name of a themeable color role
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ColorKey {
            $(
                $(#[$meta])*
                $variant,
            )*
        }

        impl ColorKey {
            /// Every registered key, in registry order
            pub const ALL: &'static [ColorKey] = &[$(ColorKey::$variant,)*];

            /// Name used by theme entries
            pub const fn name(self) -> &'static str {
                match self {
                    $(ColorKey::$variant => $name,)*
                }
            }

            /// Built-in default color
            pub const fn default_color(self) -> Color {
                match self {
                    $(ColorKey::$variant => Color($default),)*
                }
            }

            /// Registry group
            pub const fn group(self) -> KeyGroup {
                match self {
                    $(ColorKey::$variant => KeyGroup::$group,)*
                }
            }

            /// Key consulted when an overlay has no entry for this one
            pub const fn fallback(self) -> Option<ColorKey> {
                match self {
                    $(ColorKey::$variant => color_keys!(@fallback $($fallback)?),)*
                }
            }

            /// Look a key up by its name
            pub fn from_name(name: &str) -> Option<ColorKey> {
                match name {
                    $($name => Some(ColorKey::$variant),)*
                    _ => None,
                }
            }
        }
    };
    (@fallback) => { None };
    (@fallback $fallback:ident) => { Some(ColorKey::$fallback) };
}

color_keys! {
    // Window chrome
    /// Main window background
    WindowBackgroundWhite = "windowBackgroundWhite", 0xFFFFFFFF, General;
    /// Grouped list background
    WindowBackgroundGray = "windowBackgroundGray", 0xFFF0F0F0, General;
    /// Primary text on the window background
    WindowBackgroundWhiteBlackText = "windowBackgroundWhiteBlackText", 0xFF222222, General;
    /// Secondary text on the window background
    WindowBackgroundWhiteGrayText = "windowBackgroundWhiteGrayText", 0xFF8A8A8A, General;
    /// Accent text on the window background
    WindowBackgroundWhiteBlueText = "windowBackgroundWhiteBlueText", 0xFF4092CD, General;
    /// Action bar background
    ActionBarDefault = "actionBarDefault", 0xFF527DA3, General;
    /// Action bar background in the archive
    ActionBarDefaultArchived = "actionBarDefaultArchived", 0xFF6F7A87, General;
    /// Action bar icons
    ActionBarDefaultIcon = "actionBarDefaultIcon", 0xFFFFFFFF, General;
    /// Action bar subtitle text
    ActionBarDefaultSubtitle = "actionBarDefaultSubtitle", 0xFFD5E8F7, General;
    /// Checked switch track
    SwitchTrackChecked = "switchTrackChecked", 0xFF52ADE9, General;
    /// Checked checkbox fill
    CheckboxSquareBackground = "checkboxSquareBackground", 0xFF43A0DF, General;
    /// Accent text in dialogs
    DialogTextBlue = "dialogTextBlue", 0xFF2F8CC9, General;
    /// Unread counter badge
    ChatsUnreadCounter = "chats_unreadCounter", 0xFF4ECC5E, General;
    /// Floating action button
    ChatsActionBackground = "chats_actionBackground", 0xFF65A9E0, General;
    /// Verified badge background
    ChatsVerifiedBackground = "chats_verifiedBackground", 0xFF33A8E6, General;

    // Chat screen
    /// Wallpaper base color
    ChatWallpaper = "chat_wallpaper", 0xFFFFFFFF, General;
    /// First wallpaper gradient stop
    ChatWallpaperGradientTo1 = "chat_wallpaper_gradient_to1", 0x00000000, General;
    /// Second wallpaper gradient stop
    ChatWallpaperGradientTo2 = "chat_wallpaper_gradient_to2", 0x00000000, General;
    /// Third wallpaper gradient stop
    ChatWallpaperGradientTo3 = "chat_wallpaper_gradient_to3", 0x00000000, General;
    /// Wallpaper gradient rotation in degrees
    ChatWallpaperGradientRotation = "chat_wallpaper_gradient_rotation", 45, Value;
    /// Service message background
    ChatServiceBackground = "chat_serviceBackground", 0x66718EA9, General;
    /// Incoming bubble fill
    ChatInBubble = "chat_inBubble", 0xFFFFFFFF, General;
    /// Incoming bubble fill when selected
    ChatInBubbleSelected = "chat_inBubbleSelected", 0xFFECF7FD, General;
    /// Incoming bubble shadow
    ChatInBubbleShadow = "chat_inBubbleShadow", 0xFF1D3753, General;
    /// Incoming message text
    ChatMessageTextIn = "chat_messageTextIn", 0xFF000000, General;
    /// Incoming message links
    ChatMessageLinkIn = "chat_messageLinkIn", 0xFF2678B6, General;
    /// Incoming message time
    ChatInTimeText = "chat_inTimeText", 0xFFA1AAB3, General;
    /// Incoming message time when selected
    ChatInTimeSelectedText = "chat_inTimeSelectedText", 0xFF89A0B3, General;
    /// Admin badge in incoming messages
    ChatAdminText = "chat_adminText", 0xFFC0C6CB, General, fallback = ChatInTimeText;
    /// Admin badge in selected incoming messages
    ChatAdminSelectedText = "chat_adminSelectedText", 0xFF89B4C1, General, fallback = ChatInTimeSelectedText;
    /// Incoming media loader
    ChatInLoader = "chat_inLoader", 0xFF72B5E8, General;
    /// Reaction button in incoming messages
    ChatInReactionButtonBackground = "chat_inReactionButtonBackground", 0xFF78B3E3, General, fallback = ChatInLoader;

    // Outgoing messages
    /// Outgoing bubble fill
    ChatOutBubble = "chat_outBubble", 0xFFEFFFDE, MyMessages;
    /// Outgoing bubble fill when selected
    ChatOutBubbleSelected = "chat_outBubbleSelected", 0xFFD9F7C5, MyMessages;
    /// Outgoing bubble shadow
    ChatOutBubbleShadow = "chat_outBubbleShadow", 0xFF1E750C, MyMessages;
    /// First outgoing gradient stop
    ChatOutBubbleGradient1 = "chat_outBubbleGradient", 0x00000000, MyMessages;
    /// Second outgoing gradient stop
    ChatOutBubbleGradient2 = "chat_outBubbleGradient2", 0x00000000, MyMessages;
    /// Third outgoing gradient stop
    ChatOutBubbleGradient3 = "chat_outBubbleGradient3", 0x00000000, MyMessages;
    /// Whether the outgoing gradient animates (`0`/`1`)
    ChatOutBubbleGradientAnimated = "chat_outBubbleGradientAnimated", 0, Value;
    /// Wash painted over a selected gradient bubble
    ChatOutBubbleGradientSelectedOverlay = "chat_outBubbleGradientSelectedOverlay", 0x14000000, MyMessages;
    /// Outgoing message text
    ChatMessageTextOut = "chat_messageTextOut", 0xFF000000, MyMessages;
    /// Outgoing message links
    ChatMessageLinkOut = "chat_messageLinkOut", 0xFF2678B6, MyMessages;
    /// Outgoing message time
    ChatOutTimeText = "chat_outTimeText", 0xFF70B15C, MyMessages;
    /// Outgoing message time when selected
    ChatOutTimeSelectedText = "chat_outTimeSelectedText", 0xFF70B15C, MyMessages;
    /// Outgoing media loader
    ChatOutLoader = "chat_outLoader", 0xFF78C272, MyMessages;
    /// Reaction button in outgoing messages
    ChatOutReactionButtonBackground = "chat_outReactionButtonBackground", 0xFF78C272, MyMessages, fallback = ChatOutLoader;
    /// Outgoing voice message seekbar fill
    ChatOutAudioSeekbarFill = "chat_outAudioSeekbarFill", 0xFF78C272, MyMessages;
    /// Reply line in outgoing messages
    ChatOutReplyLine = "chat_outReplyLine", 0xFF88C97B, MyMessages;
    /// Reply author name in outgoing messages
    ChatOutReplyNameText = "chat_outReplyNameText", 0xFF55AB4F, MyMessages;
    /// Sent check mark
    ChatOutSentCheck = "chat_outSentCheck", 0xFF5DB050, MyMessages;
    /// Instant view button in outgoing messages
    ChatOutInstant = "chat_outInstant", 0xFF55AB4F, MyMessages;

    // Avatars
    /// Red avatar placeholder
    AvatarBackgroundRed = "avatar_backgroundRed", 0xFFE56555, Avatar;
    /// Orange avatar placeholder
    AvatarBackgroundOrange = "avatar_backgroundOrange", 0xFFF28C48, Avatar;
    /// Violet avatar placeholder
    AvatarBackgroundViolet = "avatar_backgroundViolet", 0xFF8E85EE, Avatar;
    /// Green avatar placeholder
    AvatarBackgroundGreen = "avatar_backgroundGreen", 0xFF76C84D, Avatar;
    /// Cyan avatar placeholder
    AvatarBackgroundCyan = "avatar_backgroundCyan", 0xFF5FBED5, Avatar;
    /// Blue avatar placeholder
    AvatarBackgroundBlue = "avatar_backgroundBlue", 0xFF549CDD, Avatar;
    /// Pink avatar placeholder
    AvatarBackgroundPink = "avatar_backgroundPink", 0xFFF2749A, Avatar;

    // Statistics
    /// Blue chart line
    StatisticChartLineBlue = "statisticChartLine_blue", 0xFF327FE5, Chart;
    /// Light blue chart line
    StatisticChartLineLightblue = "statisticChartLine_lightblue", 0xFF58A8ED, Chart;
    /// Red chart line
    StatisticChartLineRed = "statisticChartLine_red", 0xFFDC5F59, Chart;

    // Calls
    /// Group call action bar
    VoipgroupActionBar = "voipgroup_actionBar", 0xFF111111, Calls;
    /// Group call check mark
    VoipgroupCheckMenu = "voipgroup_checkMenu", 0xFF6BB6F9, Calls;
    /// Muted microphone button
    VoipgroupMuteButton = "voipgroup_muteButton", 0xFF77E55C, Calls;
    /// Unmuted microphone button
    VoipgroupUnmuteButton = "voipgroup_unmuteButton", 0xFF539EF8, Calls;
    /// Blue overlay of the call screen
    VoipgroupOverlayBlue1 = "voipgroup_overlayBlue1", 0xFF2BCEFF, Calls;
}

impl ColorKey {
    /// Number of registered keys
    pub const COUNT: usize = ColorKey::ALL.len();

    /// Dense index into per-key tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Keys whose alpha is forced to `0xFF` on resolution
    pub const fn is_forced_opaque(self) -> bool {
        matches!(
            self,
            ColorKey::WindowBackgroundWhite
                | ColorKey::WindowBackgroundGray
                | ColorKey::ActionBarDefault
                | ColorKey::ActionBarDefaultArchived
        )
    }

    /// Every `(key, fallback)` edge declared by the registry
    pub fn registry_fallbacks() -> impl Iterator<Item = (ColorKey, ColorKey)> {
        ColorKey::ALL.iter().filter_map(|key| key.fallback().map(|target| (*key, target)))
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorKey::from_name(s.trim()).ok_or_else(|| KeyParseError::Unknown(s.to_string()))
    }
}
