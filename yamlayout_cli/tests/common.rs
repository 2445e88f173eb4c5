use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn yamlayout_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("yamlayout"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("YAMLAYOUT_LOG");
	cmd
}
