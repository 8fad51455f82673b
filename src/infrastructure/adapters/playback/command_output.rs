//! Command Audio Output - 通过外部播放器播放音频
//!
//! 每一行音频写入临时文件，调用播放器（ffplay / mpg123 / afplay / paplay）
//! 并等待其退出。临时文件在本行结束时删除，无论成功或失败。

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::NamedTempFile;

use crate::application::ports::{AudioClip, AudioOutputPort, PlaybackError};

/// 自动探测时的播放器优先级
const PLAYER_CANDIDATES: &[&str] = &["ffplay", "mpg123", "afplay", "paplay"];

/// Command Audio Output 配置
#[derive(Debug, Clone)]
pub struct CommandAudioOutputConfig {
    /// 播放器程序名或路径，None 表示自动探测
    pub player: Option<String>,
    /// 播放器参数，为空时使用该播放器的默认参数
    pub player_args: Vec<String>,
    /// 临时音频文件后缀
    pub file_extension: String,
}

impl Default for CommandAudioOutputConfig {
    fn default() -> Self {
        Self {
            player: None,
            player_args: Vec::new(),
            file_extension: "mp3".to_string(),
        }
    }
}

/// 单行播放的临时资源
///
/// 创建于播放前，`release` 或 Drop 时删除
struct PlaybackResource {
    file: NamedTempFile,
}

impl PlaybackResource {
    fn create(clip: &AudioClip, extension: &str) -> Result<Self, PlaybackError> {
        use std::io::Write;

        let mut file = tempfile::Builder::new()
            .prefix("tubecast-line-")
            .suffix(&format!(".{}", extension))
            .tempfile()
            .map_err(|e| PlaybackError::Io(e.to_string()))?;
        file.write_all(&clip.data)
            .and_then(|_| file.flush())
            .map_err(|e| PlaybackError::Io(e.to_string()))?;

        Ok(Self { file })
    }

    fn path(&self) -> &Path {
        self.file.path()
    }

    fn release(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove temporary audio");
        }
    }
}

/// 外部播放器音频输出
pub struct CommandAudioOutput {
    player: PathBuf,
    args: Vec<String>,
    file_extension: String,
}

impl CommandAudioOutput {
    /// 创建输出；找不到播放器时返回 `PlaybackError::NoPlayer`
    pub fn new(config: CommandAudioOutputConfig) -> Result<Self, PlaybackError> {
        let player = select_player(config.player.as_deref()).ok_or(PlaybackError::NoPlayer)?;

        let args = if config.player_args.is_empty() {
            default_args(&player)
        } else {
            config.player_args
        };

        tracing::info!(
            player = %player.display(),
            args = ?args,
            "Audio player selected"
        );

        Ok(Self {
            player,
            args,
            file_extension: config.file_extension,
        })
    }
}

#[async_trait]
impl AudioOutputPort for CommandAudioOutput {
    async fn play(&self, clip: AudioClip) -> Result<(), PlaybackError> {
        if clip.is_empty() {
            return Err(PlaybackError::EmptyAudio);
        }

        let resource = PlaybackResource::create(&clip, &self.file_extension)?;
        let player_name = self.player.display().to_string();

        tracing::debug!(
            player = %player_name,
            path = %resource.path().display(),
            audio_size = clip.len(),
            "Starting playback"
        );

        let status = tokio::process::Command::new(&self.player)
            .args(&self.args)
            .arg(resource.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| PlaybackError::SpawnFailed {
                player: player_name.clone(),
                reason: e.to_string(),
            })?;

        resource.release();

        if !status.success() {
            return Err(PlaybackError::PlayerFailed {
                player: player_name,
                status: status.to_string(),
            });
        }

        Ok(())
    }
}

fn default_args(player: &Path) -> Vec<String> {
    let name = player.file_name().and_then(|s| s.to_str()).unwrap_or("");
    let args: &[&str] = match name {
        "ffplay" => &["-autoexit", "-nodisp", "-loglevel", "quiet"],
        "mpg123" => &["-q"],
        _ => &[],
    };
    args.iter().map(|s| s.to_string()).collect()
}

fn select_player(pref: Option<&str>) -> Option<PathBuf> {
    match pref {
        Some(p) => resolve_binary(p),
        None => PLAYER_CANDIDATES.iter().find_map(|name| resolve_binary(name)),
    }
}

/// 解析程序路径：含路径分隔符时直接检查文件，否则在 PATH 中查找
fn resolve_binary(bin: &str) -> Option<PathBuf> {
    let candidate = Path::new(bin);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths: OsString = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(bin))
        .find(|full| full.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(player: &str, args: &[&str]) -> CommandAudioOutput {
        CommandAudioOutput::new(CommandAudioOutputConfig {
            player: Some(player.to_string()),
            player_args: args.iter().map(|s| s.to_string()).collect(),
            file_extension: "mp3".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_default_args_per_player() {
        assert_eq!(
            default_args(Path::new("/usr/bin/ffplay")),
            vec!["-autoexit", "-nodisp", "-loglevel", "quiet"]
        );
        assert_eq!(default_args(Path::new("mpg123")), vec!["-q"]);
        assert!(default_args(Path::new("afplay")).is_empty());
    }

    #[test]
    fn test_missing_player_is_reported() {
        let result = CommandAudioOutput::new(CommandAudioOutputConfig {
            player: Some("tubecast-no-such-player".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(PlaybackError::NoPlayer)));
    }

    #[tokio::test]
    async fn test_player_receives_file_and_file_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("played.txt");
        // sh -c <script> <path>: 脚本中 $0 即音频文件路径
        let script = format!(
            "test -s \"$0\" && echo \"$0\" > {}",
            log.display()
        );
        let out = output("sh", &["-c", &script]);

        out.play(AudioClip::new(b"ID3 audio".to_vec())).await.unwrap();

        let played = std::fs::read_to_string(&log).unwrap();
        let played_path = PathBuf::from(played.trim());
        assert!(played_path.to_string_lossy().ends_with(".mp3"));
        assert!(!played_path.exists());
    }

    #[tokio::test]
    async fn test_player_failure_is_reported_and_file_removed() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("played.txt");
        let script = format!("echo \"$0\" > {}; exit 3", log.display());
        let out = output("sh", &["-c", &script]);

        let err = out.play(AudioClip::new(b"ID3 audio".to_vec())).await.unwrap_err();

        assert!(matches!(err, PlaybackError::PlayerFailed { .. }));
        let played = std::fs::read_to_string(&log).unwrap();
        assert!(!Path::new(played.trim()).exists());
    }

    #[tokio::test]
    async fn test_empty_clip_is_rejected() {
        let out = output("sh", &["-c", "exit 0"]);
        let err = out.play(AudioClip::new(Vec::new())).await.unwrap_err();
        assert!(matches!(err, PlaybackError::EmptyAudio));
    }
}
