use crate::player::{ParamsError, PlayerControlParams};
use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::log::debug;
use thiserror::Error;

/// Reads [PlayerControlParams] from `.ron` files, rejecting any that fail [PlayerControlParams::validate]
#[derive(Default)]
pub struct PlayerAssetLoader;

#[derive(Debug, Error)]
pub enum PlayerAssetLoaderError {
	#[error("Could not read player params: {0}")]
	Io(#[from] std::io::Error),

	#[error("Player params are not valid RON: {0}")]
	Ron(#[from] ron::de::SpannedError),

	#[error("Player params out of range: {0}")]
	Invalid(#[from] ParamsError),
}

/// Parse and check one params file
pub fn parse_params(bytes: &[u8]) -> Result<PlayerControlParams, PlayerAssetLoaderError> {
	let params: PlayerControlParams = ron::de::from_bytes(bytes)?;
	params.validate()?;
	Ok(params)
}

impl AssetLoader for PlayerAssetLoader {
	type Asset = PlayerControlParams;
	type Settings = ();
	type Error = PlayerAssetLoaderError;

	async fn load(
		&self,
		reader: &mut dyn Reader,
		_settings: &Self::Settings,
		load_context: &mut LoadContext<'_>,
	) -> Result<Self::Asset, Self::Error> {
		let mut bytes = Vec::new();
		reader.read_to_end(&mut bytes).await?;
		let params = parse_params(&bytes)?;
		debug!("loaded player params from {}", load_context.path().display());
		Ok(params)
	}

	fn extensions(&self) -> &[&str] {
		&["ron"]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const MOVEMENT: &str = "move_speed: 6.0, jump_force: 8.0, wall_jump_horizontal_force: 2.5,
		wall_jump_vertical_multiplier: 1.0, wall_jump_lockout: 0.35, dash_cooldown: 0.6,
		vertical_dash_duration: 0.3, max_fall_speed: 15.0, max_horizontal_speed: 100.0,
		dash_power: 100.0, max_air_jumps: 1, shared_dash_lockout: 0.4";

	#[test]
	fn missing_sections_take_defaults() {
		let text = format!("(movement: ({}, grab_fall_speed: -1.0))", MOVEMENT);
		let params = parse_params(text.as_bytes()).unwrap();
		assert_eq!(params.combat.max_health, 5);
		assert_eq!(params.knockback.lockout, 0.4);
		assert_eq!(params.stale_resets, crate::util::StaleResets::Discard);
	}

	#[test]
	fn out_of_range_params_are_rejected() {
		let text = format!("(movement: ({}, grab_fall_speed: 2.0))", MOVEMENT);
		let err = parse_params(text.as_bytes()).unwrap_err();
		assert!(matches!(err, PlayerAssetLoaderError::Invalid(ParamsError::GrabFallSpeed(_))), "{}", err);
	}

	#[test]
	fn broken_ron_is_a_parse_error() {
		let err = parse_params(b"(movement: (").unwrap_err();
		assert!(matches!(err, PlayerAssetLoaderError::Ron(_)), "{}", err);
	}
}
